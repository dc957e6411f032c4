//! Audio visualization fallback for media without a video stream.

use crate::Error;
use gstreamer as gst;
use gstreamer::prelude::*;

/// Name `playbin` gives its output bin.
pub const PLAYSINK: &str = "playsink";
/// Visualizer used when none is configured.
pub const DEFAULT_VISUALIZER: &str = "goom";
/// Nick of the play flag that enables visualizations.
const VIS_FLAG: &str = "vis";

/// Find the sink element called `name` among the sinks of `bin`.
pub fn find_sink(bin: &impl IsA<gst::Bin>, name: &str) -> Result<gst::Element, Error> {
    let mut sinks = bin.as_ref().iterate_sinks();
    loop {
        match sinks.next() {
            Ok(Some(sink)) if sink.name().as_str() == name => return Ok(sink),
            Ok(Some(_)) => {}
            Ok(None) => break,
            Err(gst::IteratorError::Resync) => sinks.resync(),
            Err(gst::IteratorError::Error) => {
                log::warn!("sink iteration of {} failed", bin.as_ref().name());
                break;
            }
        }
    }
    Err(Error::SinkNotFound(name.to_owned()))
}

/// Make the pipeline's playsink render `plugin` whenever there is no video.
pub fn enable(pipeline: &gst::Pipeline, plugin: &str) -> Result<(), Error> {
    let playsink = find_sink(pipeline, PLAYSINK)?;

    let visualizer = gst::ElementFactory::make(plugin)
        .name("source")
        .build()
        .map_err(|_| Error::Visualizer(plugin.to_owned()))?;

    for property in ["flags", "vis-plugin"] {
        if playsink.find_property(property).is_none() {
            return Err(Error::MissingProperty {
                element: playsink.name().to_string(),
                property: property.to_owned(),
            });
        }
    }

    let flags_error = || Error::Flags {
        element: playsink.name().to_string(),
        flag: VIS_FLAG.to_owned(),
    };
    let flags = playsink.property_value("flags");
    let flags_class = glib::FlagsClass::with_type(flags.type_()).ok_or_else(flags_error)?;
    let flags = flags_class
        .builder_with_value(flags)
        .ok_or_else(flags_error)?
        .set_by_nick(VIS_FLAG)
        .build()
        .ok_or_else(flags_error)?;

    playsink.set_property("vis-plugin", &visualizer);
    playsink.set_property_from_value("flags", &flags);
    log::info!("{plugin} visualization enabled on {}", playsink.name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink_bin(name: &str) -> gst::Bin {
        let bin = gst::Bin::builder().name(name).build();
        bin.set_element_flags(gst::ElementFlags::SINK);
        bin
    }

    fn pipeline_with_sinks(names: &[&str]) -> gst::Pipeline {
        gst::init().unwrap();
        let pipeline = gst::Pipeline::new();
        for name in names {
            pipeline.add(&sink_bin(name)).unwrap();
        }
        pipeline
    }

    #[test]
    fn missing_sink_is_a_named_error() {
        let pipeline = pipeline_with_sinks(&[]);
        match find_sink(&pipeline, PLAYSINK) {
            Err(Error::SinkNotFound(name)) => assert_eq!(name, PLAYSINK),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn lookup_scans_past_other_sinks() {
        let pipeline = pipeline_with_sinks(&["audiosink", "textsink", PLAYSINK]);
        let sink = find_sink(&pipeline, PLAYSINK).unwrap();
        assert_eq!(sink.name().as_str(), PLAYSINK);
    }

    #[test]
    fn non_sink_children_are_ignored() {
        let pipeline = pipeline_with_sinks(&[]);
        pipeline
            .add(&gst::Bin::builder().name(PLAYSINK).build())
            .unwrap();
        assert!(matches!(
            find_sink(&pipeline, PLAYSINK),
            Err(Error::SinkNotFound(_))
        ));
    }

    #[test]
    fn unknown_visualizer_fails() {
        let pipeline = pipeline_with_sinks(&[PLAYSINK]);
        match enable(&pipeline, "no-such-visualizer") {
            Err(Error::Visualizer(name)) => assert_eq!(name, "no-such-visualizer"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
