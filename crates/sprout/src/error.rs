//! Error types for Sprout operations.
//!
//! This module provides the main error type [`SproutError`] which wraps
//! the conditions that stop a run. Failures to create individual entries
//! are not errors of this kind; see
//! [`CreationFailure`](crate::materialize::CreationFailure).

use std::{io, path::PathBuf};

use thiserror::Error;

use sprout_parser::{InvalidConfig, ParseError};

/// The main error type for Sprout operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries the diagram source next to the parser's
/// diagnostics so that callers can render source snippets.
#[derive(Debug, Error)]
pub enum SproutError {
    #[error("Input file '{}' does not exist or is not a regular file", .0.display())]
    InputNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{failed} of {total} entries could not be created")]
    Incomplete { failed: usize, total: usize },
}

impl From<InvalidConfig> for SproutError {
    fn from(err: InvalidConfig) -> Self {
        Self::Config(err.to_string())
    }
}

impl SproutError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
