use gstreamer as gst;
use std::path::PathBuf;

/// Errors raised while setting up or driving the player.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Glib(#[from] glib::Error),
    #[error("{0}")]
    Bool(#[from] glib::BoolError),
    #[error("failed to change pipeline state: {0}")]
    StateChange(#[from] gst::StateChangeError),
    #[error("cannot open media file {path:?}: {source}")]
    MediaPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("media path {0:?} cannot be expressed as a file uri")]
    Uri(PathBuf),
    #[error("failed to cast a pipeline element")]
    Cast,
    #[error("pipeline has no bus")]
    Bus,
    #[error("invalid or missing caps")]
    Caps,
    #[error("pipeline has no sink named `{0}`")]
    SinkNotFound(String),
    #[error("unable to create `{0}` visualizer")]
    Visualizer(String),
    #[error("element `{element}` has no property `{property}`")]
    MissingProperty { element: String, property: String },
    #[error("cannot set `{flag}` in the flags of `{element}`")]
    Flags { element: String, flag: String },
    #[error("frame conversion failed: {0}")]
    Conversion(String),
    #[error("window error: {0}")]
    Window(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_errors_name_what_is_missing() {
        assert_eq!(Error::Bus.to_string(), "pipeline has no bus");
        assert_eq!(
            Error::SinkNotFound("playsink".into()).to_string(),
            "pipeline has no sink named `playsink`"
        );
        assert_eq!(
            Error::Visualizer("goom".into()).to_string(),
            "unable to create `goom` visualizer"
        );
    }
}
