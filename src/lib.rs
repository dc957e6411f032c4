//! # GPUI Loop Player
//!
//! A minimal looping video player for GPUI using GStreamer for media playback.
//!
//! ## Features
//!
//! - GStreamer-powered decoding through `playbin` and an appsink
//! - Aspect-ratio preserving fit of the frame inside the window
//! - Optional restart from the beginning at end of stream
//! - Audio visualization when the media has no video stream
//! - `q` or `Escape` closes the player
//!
//! ## Example
//!
//! ```no_run
//! use gpui_loop_player::{PlayerOptions, run};
//!
//! let mut options = PlayerOptions::new("/path/to/video.mp4");
//! options.looping = true;
//! run(options).unwrap();
//! ```

mod app;
mod cli;
mod element;
mod error;
mod fit;
mod frame;
mod input;
mod options;
mod playback;
mod video;
mod visualization;

pub use app::{PlayerView, run};
pub use cli::Args;
pub use element::{VideoSurface, video_surface};
pub use error::Error;
pub use fit::{FrameGeometry, RenderRect, fit_rect};
pub use input::{InputAction, action_for_key};
pub use options::{DEFAULT_WINDOW_SIZE, MIN_WINDOW_SIZE, PlayerOptions};
pub use playback::{MediaControl, PlaybackController, PlaybackState};
pub use video::{MediaEvent, Video};
pub use visualization::{DEFAULT_VISUALIZER, PLAYSINK, enable as enable_visualization, find_sink};

// Re-export commonly used types
pub use url::Url;
pub use gstreamer as gst;
