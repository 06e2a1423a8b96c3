//! Command-line argument definitions for the Sprout CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Flags given here take precedence over the values loaded
//! from a configuration file.

use std::str::FromStr;

use clap::Parser;
use log::LevelFilter;

/// Command-line arguments for the Sprout tree tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the tree diagram file
    #[arg(help = "Path to the tree diagram file")]
    pub tree_file: String,

    /// Directory in which the structure is created
    #[arg(help = "Directory in which the structure is created")]
    pub output_dir: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Columns of decoration per nesting level
    #[arg(long)]
    pub indent_width: Option<usize>,

    /// Reject malformed diagrams instead of recovering
    #[arg(long)]
    pub strict: bool,

    /// Create all directories before any file
    #[arg(long)]
    pub two_pass: bool,

    /// Print what would be created without touching the filesystem
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// The requested log level, or `None` if `--log-level` names no level.
    pub fn log_level_filter(&self) -> Option<LevelFilter> {
        LevelFilter::from_str(&self.log_level).ok()
    }
}
