use crate::options::PlayerOptions;
use clap::Parser;
use std::path::PathBuf;

/// A simple looping video player
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Media file to play
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Start the player in fullscreen
    #[arg(short, long)]
    pub fullscreen: bool,

    /// Start the video again once it reaches the end
    #[arg(short = 'l', long = "loop")]
    pub looping: bool,
}

impl From<Args> for PlayerOptions {
    fn from(args: Args) -> Self {
        PlayerOptions {
            fullscreen: args.fullscreen,
            looping: args.looping,
            ..PlayerOptions::new(args.file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn file_is_required() {
        let err = Args::try_parse_from(["gpui-loop-player"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_ne!(err.exit_code(), 0);
        assert!(err.to_string().contains("Usage"));

        let err = Args::try_parse_from(["gpui-loop-player", "--loop", "-f"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn short_flags() {
        let args = Args::try_parse_from(["gpui-loop-player", "-f", "-l", "clip.mp4"]).unwrap();
        let options = PlayerOptions::from(args);
        assert!(options.fullscreen);
        assert!(options.looping);
        assert_eq!(options.media, PathBuf::from("clip.mp4"));
    }

    #[test]
    fn long_flags() {
        let args =
            Args::try_parse_from(["gpui-loop-player", "clip.mp4", "--loop"]).unwrap();
        let options = PlayerOptions::from(args);
        assert!(!options.fullscreen);
        assert!(options.looping);

        let args =
            Args::try_parse_from(["gpui-loop-player", "--fullscreen", "clip.mp4"]).unwrap();
        assert!(PlayerOptions::from(args).fullscreen);
    }

    #[test]
    fn flags_default_off() {
        let options = PlayerOptions::from(Args::try_parse_from(["gpui-loop-player", "a.mov"]).unwrap());
        assert_eq!(options, PlayerOptions::new("a.mov"));
    }
}
