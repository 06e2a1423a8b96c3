//! Configuration types for Sprout.
//!
//! This module provides configuration structures that control how diagrams
//! are read and how entries are created. All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining parser and materializer settings.
//! - [`ParserConfig`] - Indentation unit and malformed-diagram policy.
//! - [`MaterializeConfig`] - Creation order and dry-run switch.
//!
//! # Example
//!
//! ```
//! # use sprout::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.parser().indent_width(), 4);
//! assert!(!config.materialize().dry_run());
//! ```

use serde::Deserialize;

use sprout_parser::{DEFAULT_INDENT_WIDTH, InvalidConfig, ParseConfig};

use crate::materialize::PassMode;

/// Top-level configuration combining parser and materializer settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parser configuration section.
    #[serde(default)]
    parser: ParserConfig,

    /// Materializer configuration section.
    #[serde(default)]
    materialize: MaterializeConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `parser` - How diagrams are read.
    /// * `materialize` - How entries are created.
    pub fn new(parser: ParserConfig, materialize: MaterializeConfig) -> Self {
        Self {
            parser,
            materialize,
        }
    }

    /// Returns the parser configuration.
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    /// Returns the materializer configuration.
    pub fn materialize(&self) -> &MaterializeConfig {
        &self.materialize
    }
}

/// How diagrams are read.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Columns of decoration per nesting level.
    #[serde(default = "default_indent_width")]
    indent_width: usize,

    /// Reject malformed diagrams instead of recovering.
    #[serde(default)]
    strict: bool,
}

fn default_indent_width() -> usize {
    DEFAULT_INDENT_WIDTH
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            strict: false,
        }
    }
}

impl ParserConfig {
    pub fn new(indent_width: usize, strict: bool) -> Self {
        Self {
            indent_width,
            strict,
        }
    }

    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Validated settings for [`sprout_parser::parse`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig`] if the indent width is 0.
    pub fn to_parse_config(&self) -> Result<ParseConfig, InvalidConfig> {
        ParseConfig::new(self.indent_width, self.strict)
    }
}

/// How entries are created.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterializeConfig {
    /// Order in which entries are created.
    #[serde(default)]
    pass: PassMode,

    /// Report what would be created without touching the filesystem.
    #[serde(default)]
    dry_run: bool,
}

impl MaterializeConfig {
    pub fn new(pass: PassMode, dry_run: bool) -> Self {
        Self { pass, dry_run }
    }

    pub fn pass(&self) -> PassMode {
        self.pass
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}
