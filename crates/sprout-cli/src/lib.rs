//! CLI logic for the Sprout tree tool.
//!
//! This module contains the core CLI logic: loading configuration, parsing
//! the diagram and creating its entries below the output directory.

pub mod error_adapter;

mod args;
mod config;
mod reporter;

pub use args::Args;
pub use reporter::ConsoleReporter;

use std::path;

use log::{info, warn};

use sprout::{SproutError, TreeBuilder};

use error_adapter::{DiagnosticAdapter, render};

/// Run the Sprout CLI application
///
/// This function reads the tree diagram, parses it and creates every entry
/// below the output directory, printing one line per created entry.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `SproutError` for:
/// - A missing input file (before anything is created)
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors (strict mode)
/// - Entries that could not be created, after all others were attempted
pub fn run(args: &Args) -> Result<(), SproutError> {
    info!(
        tree_file = args.tree_file,
        output_dir = args.output_dir;
        "Processing diagram"
    );

    // Load configuration and apply flags on top
    let app_config = config::load_config(args.config.as_ref())?;
    let app_config = config::apply_overrides(app_config, args)?;
    let dry_run = app_config.materialize().dry_run();

    let builder = TreeBuilder::new(app_config);
    let source = builder.read_source(&args.tree_file)?;
    let output = path::absolute(&args.output_dir)?;

    let tree = builder.parse(&source)?;
    for warning in tree.warnings() {
        warn!("{}", render(&DiagnosticAdapter::new(warning, &source)));
    }

    let report = builder.materialize(&tree, &output, &mut ConsoleReporter)?;

    if report.is_complete() {
        if dry_run {
            println!("Dry run complete, nothing was created in: {}", output.display());
        } else {
            println!("Successfully created structure in: {}", output.display());
        }
    }

    report.into_result()?;

    info!(output_dir = output.display().to_string(); "Structure created");

    Ok(())
}
