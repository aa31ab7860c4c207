//! `tt`: a small binary that exercises the typing-practice core end to
//! end — segmentation for manual inspection, or a scripted keystroke
//! replay against one segment — without embedding it in a full
//! application. It owns no typing-engine logic of its own.

mod args;
mod commands;
mod config;
mod error;
mod logging;

use clap::Parser;

use args::{Args, Command};
use error::CliError;

fn main() -> std::process::ExitCode {
    logging::init();

    match run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tt: {err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            std::process::ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let args = Args::parse();
    let engine_config = config::resolve(&args.config, &args.overrides)?;

    match &args.command {
        Command::Segment(segment_args) => commands::segment::run(segment_args, &engine_config),
        Command::Replay(replay_args) => commands::replay::run(replay_args, &engine_config),
    }
}
