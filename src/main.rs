use clap::Parser;
use env_logger::Env;
use gpui_loop_player::{Args, PlayerOptions};
use std::process::ExitCode;

fn main() -> ExitCode {
    // exits with usage and a failure status before anything is created
    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    match gpui_loop_player::run(PlayerOptions::from(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
