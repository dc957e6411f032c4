use crate::Error;

/// The subset of a media render target the playback controller drives.
pub trait MediaControl {
    /// Seek to a position normalized to `0.0..=1.0` of the media duration.
    fn set_progress(&self, progress: f64) -> Result<(), Error>;

    /// Start or pause playback.
    fn set_playing(&self, playing: bool) -> Result<(), Error>;
}

/// Where playback currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    /// Reached end-of-stream without looping. Nothing leaves this state.
    StoppedAtEnd,
    /// The pipeline reported an error. Nothing leaves this state.
    Failed,
}

/// Reacts to end-of-stream by either rewinding or stopping.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    looping: bool,
    state: PlaybackState,
}

impl PlaybackController {
    pub fn new(looping: bool) -> Self {
        Self {
            looping,
            state: PlaybackState::Playing,
        }
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Start playing `media`.
    pub fn start(&mut self, media: &impl MediaControl) -> Result<(), Error> {
        media.set_playing(true)?;
        self.state = PlaybackState::Playing;
        Ok(())
    }

    /// Handle an end-of-stream notification from `media`.
    ///
    /// With looping enabled the media is rewound to the start and resumed.
    /// A failed rewind is logged and leaves the controller stopped.
    pub fn on_end_of_stream(&mut self, media: &impl MediaControl) -> PlaybackState {
        if self.state == PlaybackState::Failed {
            return self.state;
        }
        if !self.looping {
            log::info!("end of stream reached");
            self.state = PlaybackState::StoppedAtEnd;
            return self.state;
        }

        log::debug!("end of stream reached, restarting from the beginning");
        let restarted = media
            .set_progress(0.0)
            .and_then(|()| media.set_playing(true));
        self.state = match restarted {
            Ok(()) => PlaybackState::Playing,
            Err(err) => {
                log::error!("failed to restart playback: {err}");
                PlaybackState::StoppedAtEnd
            }
        };
        self.state
    }

    /// Handle a pipeline error. Playback is considered over.
    pub fn on_error(&mut self, message: &str) -> PlaybackState {
        log::error!("playback halted: {message}");
        self.state = PlaybackState::Failed;
        self.state
    }
}
