use crate::Error;
use crate::playback::MediaControl;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_app::prelude::*;
use gstreamer_video as gst_video;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

const APPSINK_NAME: &str = "loop_player_video";

/// Notifications drained from the pipeline on the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Playback reached the end of the media.
    EndOfStream,
    /// The natural frame size changed.
    SizeChanged { width: u32, height: u32 },
    /// The pipeline posted an error.
    Error(String),
}

#[derive(Debug)]
pub(crate) struct Internal {
    pub(crate) bus: gst::Bus,
    pub(crate) source: gst::Pipeline,
    pub(crate) alive: Arc<AtomicBool>,
    pub(crate) worker: Option<std::thread::JoinHandle<()>>,

    pub(crate) natural_size: Arc<Mutex<Option<(u32, u32)>>>,
    pub(crate) size_changed: Arc<AtomicBool>,

    pub(crate) frame: Arc<Mutex<Option<gst::Sample>>>,
    pub(crate) upload_frame: Arc<AtomicBool>,
}

impl Internal {
    pub(crate) fn set_progress(&self, progress: f64) -> Result<(), Error> {
        let progress = progress.clamp(0.0, 1.0);
        let target = if progress == 0.0 {
            gst::ClockTime::ZERO
        } else {
            let duration = self
                .source
                .query_duration::<gst::ClockTime>()
                .unwrap_or(gst::ClockTime::ZERO);
            gst::ClockTime::from_nseconds((duration.nseconds() as f64 * progress) as u64)
        };

        self.source
            .seek_simple(gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT, target)?;
        Ok(())
    }

    pub(crate) fn set_playing(&self, playing: bool) -> Result<(), Error> {
        self.source.set_state(if playing {
            gst::State::Playing
        } else {
            gst::State::Paused
        })?;
        Ok(())
    }

    pub(crate) fn playing(&self) -> bool {
        let (_, current, pending) = self.source.state(gst::ClockTime::ZERO);
        current == gst::State::Playing || pending == gst::State::Playing
    }
}

/// A media source rendered through an appsink, loaded from a URI.
#[derive(Debug, Clone)]
pub struct Video(pub(crate) Arc<RwLock<Internal>>);

impl Drop for Video {
    fn drop(&mut self) {
        // Only cleanup if this is the last reference
        if Arc::strong_count(&self.0) == 1 {
            if let Some(mut inner) = self.0.try_write() {
                if let Err(err) = inner.source.set_state(gst::State::Null) {
                    log::warn!("failed to shut down pipeline: {err}");
                }

                inner.alive.store(false, Ordering::SeqCst);
                if let Some(worker) = inner.worker.take() {
                    if let Err(err) = worker.join() {
                        match err.downcast_ref::<String>() {
                            Some(e) => log::error!("Video thread panicked: {e}"),
                            None => log::error!("Video thread panicked with unknown reason"),
                        }
                    }
                }
            }
        }
    }
}

impl Video {
    /// Build a stopped `playbin` pipeline for `uri`.
    ///
    /// Frames are delivered as NV12 with square pixels, so the appsink caps
    /// already carry the natural display size.
    pub fn new(uri: &url::Url) -> Result<Self, Error> {
        gst::init()?;

        let pipeline = format!(
            "playbin uri=\"{}\" video-sink=\"videoscale ! videoconvert ! appsink name={APPSINK_NAME} drop=true max-buffers=2 caps=video/x-raw,format=NV12,pixel-aspect-ratio=1/1\"",
            uri.as_str()
        );
        let pipeline = gst::parse::launch(pipeline.as_ref())?
            .downcast::<gst::Pipeline>()
            .map_err(|_| Error::Cast)?;

        let video_sink = pipeline
            .property::<gst::Element>("video-sink")
            .downcast::<gst::Bin>()
            .map_err(|_| Error::Cast)?
            .by_name(APPSINK_NAME)
            .ok_or(Error::Cast)?
            .downcast::<gst_app::AppSink>()
            .map_err(|_| Error::Cast)?;

        Self::from_gst_pipeline(pipeline, video_sink)
    }

    /// Wrap an existing pipeline whose video ends in `video_sink`.
    ///
    /// The pipeline is moved to `Ready`; playback starts with
    /// [`MediaControl::set_playing`].
    pub fn from_gst_pipeline(
        pipeline: gst::Pipeline,
        video_sink: gst_app::AppSink,
    ) -> Result<Self, Error> {
        gst::init()?;
        let bus = pipeline.bus().ok_or(Error::Bus)?;
        if let Err(err) = pipeline.set_state(gst::State::Ready) {
            let _ = pipeline.set_state(gst::State::Null);
            return Err(err.into());
        }

        let frame = Arc::new(Mutex::new(None));
        let upload_frame = Arc::new(AtomicBool::new(false));
        let natural_size = Arc::new(Mutex::new(None));
        let size_changed = Arc::new(AtomicBool::new(false));
        let alive = Arc::new(AtomicBool::new(true));

        let frame_ref = Arc::clone(&frame);
        let upload_frame_ref = Arc::clone(&upload_frame);
        let natural_size_ref = Arc::clone(&natural_size);
        let size_changed_ref = Arc::clone(&size_changed);
        let alive_ref = Arc::clone(&alive);
        let pipeline_ref = pipeline.clone();

        let worker = std::thread::spawn(move || {
            while alive_ref.load(Ordering::Acquire) {
                // nothing to pull until the pipeline is prerolled again
                if video_sink.is_eos() {
                    std::thread::sleep(Duration::from_millis(16));
                    continue;
                }

                let sample = if pipeline_ref.current_state() == gst::State::Playing {
                    video_sink.try_pull_sample(gst::ClockTime::from_mseconds(16))
                } else {
                    video_sink.try_pull_preroll(gst::ClockTime::from_mseconds(16))
                };
                let Some(sample) = sample else {
                    continue;
                };

                match sample_size(&sample) {
                    Ok(size) => {
                        let mut current = natural_size_ref.lock();
                        if *current != Some(size) {
                            *current = Some(size);
                            size_changed_ref.store(true, Ordering::SeqCst);
                        }
                    }
                    Err(err) => {
                        log::error!("error processing frame: {err}");
                        continue;
                    }
                }

                *frame_ref.lock() = Some(sample);
                upload_frame_ref.store(true, Ordering::SeqCst);
            }
        });

        Ok(Video(Arc::new(RwLock::new(Internal {
            bus,
            source: pipeline,
            alive,
            worker: Some(worker),

            natural_size,
            size_changed,

            frame,
            upload_frame,
        }))))
    }

    pub(crate) fn read(&self) -> parking_lot::RwLockReadGuard<'_, Internal> {
        self.0.read()
    }

    /// Whether the pipeline is, or is about to be, playing.
    pub fn playing(&self) -> bool {
        self.read().playing()
    }

    /// Natural size of the decoded frames as `(width, height)`, once known.
    pub fn natural_size(&self) -> Option<(u32, u32)> {
        *self.read().natural_size.lock()
    }

    /// Get the underlying GStreamer pipeline.
    pub fn pipeline(&self) -> gst::Pipeline {
        self.read().source.clone()
    }

    /// Take the newest decoded sample if one arrived since the last call.
    pub(crate) fn take_frame(&self) -> Option<gst::Sample> {
        let inner = self.read();
        if !inner.upload_frame.swap(false, Ordering::SeqCst) {
            return None;
        }
        inner.frame.lock().clone()
    }

    /// Drain pending bus messages and size changes without blocking.
    pub fn poll_events(&self) -> Vec<MediaEvent> {
        let inner = self.read();
        let mut events = Vec::new();

        if inner.size_changed.swap(false, Ordering::SeqCst) {
            if let Some((width, height)) = *inner.natural_size.lock() {
                events.push(MediaEvent::SizeChanged { width, height });
            }
        }

        while let Some(msg) = inner.bus.pop_filtered(&[
            gst::MessageType::Error,
            gst::MessageType::Warning,
            gst::MessageType::Eos,
        ]) {
            match msg.view() {
                gst::MessageView::Error(err) => {
                    log::error!(
                        "GStreamer error from {:?}: {}",
                        err.src().map(|s| s.path_string()),
                        err.error()
                    );
                    events.push(MediaEvent::Error(err.error().to_string()));
                }
                gst::MessageView::Warning(warn) => {
                    log::warn!(
                        "GStreamer warning from {:?}: {}",
                        warn.src().map(|s| s.path_string()),
                        warn.error()
                    );
                }
                gst::MessageView::Eos(_) => events.push(MediaEvent::EndOfStream),
                _ => {}
            }
        }

        events
    }
}

impl MediaControl for Video {
    fn set_progress(&self, progress: f64) -> Result<(), Error> {
        self.read().set_progress(progress)
    }

    fn set_playing(&self, playing: bool) -> Result<(), Error> {
        self.read().set_playing(playing)
    }
}

fn sample_size(sample: &gst::Sample) -> Result<(u32, u32), Error> {
    let caps = sample.caps().ok_or(Error::Caps)?;
    let info = gst_video::VideoInfo::from_caps(caps).map_err(|_| Error::Caps)?;
    Ok((info.width(), info.height()))
}
