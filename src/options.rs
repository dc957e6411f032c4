use crate::visualization::DEFAULT_VISUALIZER;
use std::path::PathBuf;

/// Window size used when not starting fullscreen.
pub const DEFAULT_WINDOW_SIZE: (f32, f32) = (768.0, 576.0);
/// The window cannot be resized below this.
pub const MIN_WINDOW_SIZE: (f32, f32) = (640.0, 480.0);

/// Everything the player needs to start, fixed once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerOptions {
    pub media: PathBuf,
    pub fullscreen: bool,
    pub looping: bool,
    pub window_size: (f32, f32),
    pub min_window_size: (f32, f32),
    /// Keep the mouse cursor visible over the video.
    pub show_cursor: bool,
    /// GStreamer factory name of the audio visualizer.
    pub visualizer: String,
}

impl PlayerOptions {
    pub fn new(media: impl Into<PathBuf>) -> Self {
        Self {
            media: media.into(),
            fullscreen: false,
            looping: false,
            window_size: DEFAULT_WINDOW_SIZE,
            min_window_size: MIN_WINDOW_SIZE,
            show_cursor: false,
            visualizer: DEFAULT_VISUALIZER.to_owned(),
        }
    }

    /// Window title derived from the media file name.
    pub fn title(&self) -> String {
        match self.media.file_name() {
            Some(name) => format!("{} - Loop Player", name.to_string_lossy()),
            None => "Loop Player".to_owned(),
        }
    }
}
