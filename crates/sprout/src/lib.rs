//! Sprout - create empty directory and file layouts from tree diagrams.
//!
//! A tree diagram is the indented listing printed by tools like `tree`.
//! Sprout parses such a listing and creates every declared directory and
//! (empty) file below an output root, leaving anything that already exists
//! untouched.

pub mod config;
pub mod materialize;

mod error;

pub use sprout_parser::{Entry, ParsedTree, error as diagnostics};

pub use error::SproutError;

use std::{fs, path::Path};

use log::{debug, info, trace};

use config::AppConfig;
use materialize::{MaterializeReport, Materializer, Reporter};

/// Builder for parsing diagrams and materializing them.
///
/// # Examples
///
/// ```rust,no_run
/// use sprout::{TreeBuilder, config::AppConfig, materialize::LogReporter};
///
/// let source = "src/\n    main.rs\n";
///
/// let builder = TreeBuilder::new(AppConfig::default());
///
/// // Parse the diagram
/// let tree = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Create the entries below `out/`
/// let report = builder.materialize(&tree, "out", &mut LogReporter)
///     .expect("Failed to create output root");
/// assert!(report.is_complete());
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    config: AppConfig,
}

impl TreeBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Read a diagram file.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::InputNotFound`] if `path` is missing or is not
    /// a regular file, and [`SproutError::Io`] if it cannot be read.
    pub fn read_source(&self, path: impl AsRef<Path>) -> Result<String, SproutError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SproutError::InputNotFound(path.to_path_buf()));
        }

        let source = fs::read_to_string(path)?;
        debug!(path = path.display().to_string(), bytes = source.len(); "Diagram read");
        Ok(source)
    }

    /// Parse diagram source into entries.
    ///
    /// Warnings from a permissive parse are kept on the returned tree for
    /// the caller to report.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::Config`] for an invalid parser configuration
    /// and [`SproutError::Parse`] when a strict parse rejects the diagram.
    pub fn parse(&self, source: &str) -> Result<ParsedTree, SproutError> {
        let parse_config = self.config.parser().to_parse_config()?;

        let tree = sprout_parser::parse(source, parse_config)
            .map_err(|err| SproutError::new_parse_error(err, source))?;

        for warning in tree.warnings() {
            debug!("{warning}");
        }
        info!(
            directories = tree.directories().count(),
            files = tree.files().count(),
            warnings = tree.warnings().len();
            "Diagram parsed"
        );
        trace!(entries:? = tree.entries(); "Parsed entries");

        Ok(tree)
    }

    /// Create the entries of `tree` below `root`.
    ///
    /// The root is created first if it does not exist. Entries that cannot
    /// be created are reported to `reporter` and listed in the returned
    /// report; they do not stop the run.
    ///
    /// # Errors
    ///
    /// Returns [`SproutError::Io`] if the root itself cannot be created.
    pub fn materialize(
        &self,
        tree: &ParsedTree,
        root: impl AsRef<Path>,
        reporter: &mut dyn Reporter,
    ) -> Result<MaterializeReport, SproutError> {
        let root = root.as_ref();
        let settings = self.config.materialize();

        if !settings.dry_run() {
            fs::create_dir_all(root)?;
        }

        let report = Materializer::new(root)
            .with_pass_mode(settings.pass())
            .with_dry_run(settings.dry_run())
            .run(tree.entries(), reporter);

        info!(
            created = report.directories_created() + report.files_created(),
            existing = report.existing(),
            failed = report.failures().len();
            "Materialization completed"
        );
        Ok(report)
    }
}
