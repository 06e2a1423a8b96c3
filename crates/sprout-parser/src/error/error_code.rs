//! Error codes for the Sprout diagnostic system.
//!
//! All codes belong to the structure phase (`E1xx`): each one names a way
//! in which a diagram line disagrees with the tree built so far.

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Entry nested under a file.
    ///
    /// A line is indented deeper than the file declared right above it.
    /// Files cannot have children.
    E100,

    /// Skipped indentation level.
    ///
    /// A line is indented more than one level deeper than the deepest open
    /// directory.
    E101,

    /// Unsafe entry name.
    ///
    /// The name would resolve outside the output root (`..`, a leading `/`)
    /// or refers to the current directory (`.`).
    E102,

    /// Ragged indentation.
    ///
    /// The indentation width is not a multiple of the configured indent
    /// width.
    E103,

    /// Conflicting declaration.
    ///
    /// The same path is declared once as a file and once as a directory.
    E104,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "entry nested under a file",
            ErrorCode::E101 => "skipped indentation level",
            ErrorCode::E102 => "unsafe entry name",
            ErrorCode::E103 => "ragged indentation",
            ErrorCode::E104 => "conflicting declaration",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
