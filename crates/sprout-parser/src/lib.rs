//! # Sprout Parser
//!
//! Parser for tree diagrams: the indented listings drawn with `│ ├ └ ─`
//! that tools like `tree` print. This crate turns such a listing into an
//! ordered list of [`Entry`] values, each one a file or directory with its
//! full path relative to the diagram root.
//!
//! ## Usage
//!
//! ```
//! # use sprout_parser::{parse, ParseConfig, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "\
//! src/
//! ├── main.rs   # entry point
//! └── utils/
//!     └── helpers.rs
//! ";
//!
//!     let tree = parse(source, ParseConfig::default())?;
//!     assert_eq!(tree.len(), 4);
//!     assert_eq!(tree.entries()[3].to_string(), "src/utils/helpers.rs");
//!     Ok(())
//! }
//! ```
//!
//! ## Malformed diagrams
//!
//! By default the parser recovers from malformed lines and reports what it
//! did as warnings on the returned [`ParsedTree`]. With
//! [`ParseConfig::strict`] the same findings are errors and the diagram is
//! rejected with a [`ParseError`].

pub mod error;
pub mod line;

mod config;
mod entry;
mod parser;
mod span;

pub use config::{DEFAULT_INDENT_WIDTH, ParseConfig};
pub use entry::Entry;
pub use error::{InvalidConfig, ParseError};
pub use span::Span;

use log::info;

use error::Diagnostic;
use parser::TreeParser;

/// The entries declared by a diagram, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ParsedTree {
    entries: Vec<Entry>,
    warnings: Vec<Diagnostic>,
}

impl ParsedTree {
    /// Create a parsed tree from entries and the warnings raised for them.
    pub fn new(entries: Vec<Entry>, warnings: Vec<Diagnostic>) -> Self {
        Self { entries, warnings }
    }

    /// All entries, parents before children.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Problems the parser recovered from.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Entries declared as directories.
    pub fn directories(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.is_directory())
    }

    /// Entries declared as files.
    pub fn files(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.is_file())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the tree, keeping only the entries.
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

/// Parse a tree diagram into its entries.
///
/// Lines are read top to bottom. Blank lines, decoration-only lines and
/// comment-only lines declare nothing. A trailing `/` marks a directory;
/// text after `#` is a comment. Nesting depth is the indentation width
/// divided by [`ParseConfig::indent_width`].
///
/// # Arguments
///
/// * `source` - The diagram text
/// * `config` - Indentation unit and malformed-diagram policy
///
/// # Errors
///
/// Returns a [`ParseError`] holding every finding when the strict policy is
/// enabled and the diagram is malformed. A permissive parse never fails.
pub fn parse(source: &str, config: ParseConfig) -> Result<ParsedTree, ParseError> {
    info!(
        indent_width = config.indent_width(),
        strict = config.is_strict();
        "Parsing tree diagram"
    );

    let mut parser = TreeParser::new(config);
    for line in line::lines(source) {
        parser.push(&line);
    }
    parser.finish()
}
