//! Sprout CLI entry point.

use std::process;

use clap::Parser;
use log::{Level, LevelFilter, debug, error, info, log_enabled};

use sprout_cli::{Args, error_adapter::render_error};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = args.log_level_filter().unwrap_or_else(|| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Sprout");
    debug!(args:?; "Parsed arguments");

    let Err(err) = sprout_cli::run(&args) else {
        info!("Completed successfully");
        return;
    };

    // Errors reach stderr even when logging is switched off.
    let to_log = log_enabled!(Level::Error);
    for report in render_error(&err) {
        if to_log {
            error!("{report}");
        } else {
            eprintln!("{report}");
        }
    }
    process::exit(1);
}
