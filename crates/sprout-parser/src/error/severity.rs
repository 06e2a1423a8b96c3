//! Severity levels for diagnostics.
//!
//! A strict parse turns every finding into an error; a permissive parse
//! recovers and records the same finding as a warning.

use std::fmt;

/// The severity level of a diagnostic.
///
/// - [`Severity::Error`] rejects the diagram
/// - [`Severity::Warning`] reports a recovered problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The diagram is rejected and nothing is materialized.
    Error,

    /// The parser recovered; the entry list reflects the recovery.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
