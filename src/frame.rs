use crate::Error;
use gstreamer as gst;
use gstreamer_video as gst_video;
use gstreamer_video::VideoFrameExt;
use image::{ImageBuffer, Rgba};
use smallvec::SmallVec;
use std::sync::Arc;
use yuv::{YuvBiPlanarImage, YuvConversionMode, YuvRange, YuvStandardMatrix, yuv_nv12_to_bgra};

/// Convert an NV12 sample into an image gpui can paint.
///
/// gpui stores render images as BGRA, so the conversion writes that order
/// directly even though the buffer type is labelled `Rgba`.
pub(crate) fn render_image(sample: &gst::Sample) -> Result<Arc<gpui::RenderImage>, Error> {
    let caps = sample.caps().ok_or(Error::Caps)?;
    let info = gst_video::VideoInfo::from_caps(caps).map_err(|_| Error::Caps)?;
    let buffer = sample.buffer().ok_or(Error::Caps)?;
    let frame = gst_video::VideoFrameRef::from_buffer_ref_readable(buffer, &info)?;

    let width = frame.width();
    let height = frame.height();
    let strides = frame.plane_stride();

    let nv12 = YuvBiPlanarImage {
        y_plane: frame.plane_data(0)?,
        y_stride: strides[0] as u32,
        uv_plane: frame.plane_data(1)?,
        uv_stride: strides[1] as u32,
        width,
        height,
    };

    let mut bgra = vec![0u8; width as usize * height as usize * 4];
    yuv_nv12_to_bgra(
        &nv12,
        &mut bgra,
        width * 4,
        range(&info),
        matrix(&info),
        YuvConversionMode::Balanced,
    )
    .map_err(|err| Error::Conversion(format!("{err:?}")))?;

    let buffer = ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, bgra)
        .ok_or_else(|| Error::Conversion(format!("bad {width}x{height} buffer")))?;
    let frames: SmallVec<[image::Frame; 1]> = SmallVec::from_elem(image::Frame::new(buffer), 1);
    Ok(Arc::new(gpui::RenderImage::new(frames)))
}

fn range(info: &gst_video::VideoInfo) -> YuvRange {
    match info.colorimetry().range() {
        gst_video::VideoColorRange::Range0_255 => YuvRange::Full,
        _ => YuvRange::Limited,
    }
}

fn matrix(info: &gst_video::VideoInfo) -> YuvStandardMatrix {
    match info.colorimetry().matrix() {
        gst_video::VideoColorMatrix::Bt601 => YuvStandardMatrix::Bt601,
        gst_video::VideoColorMatrix::Bt2020 => YuvStandardMatrix::Bt2020,
        gst_video::VideoColorMatrix::Smpte240m => YuvStandardMatrix::Smpte240,
        gst_video::VideoColorMatrix::Fcc => YuvStandardMatrix::Fcc,
        // HD default, also used for unknown colorimetry
        _ => YuvStandardMatrix::Bt709,
    }
}
