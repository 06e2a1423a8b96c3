//! Error and diagnostic system for the Sprout parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Labeled spans pointing at the offending diagram lines
//! - Severity levels
//! - Diagnostic collector for accumulating multiple findings
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning with an optional error code, source locations
//! and help text. A strict parse returns every error it found wrapped in a
//! [`ParseError`]; a permissive parse hands its warnings back alongside the
//! entries.
//!
//! # Example
//!
//! ```
//! # use sprout_parser::error::{Diagnostic, ErrorCode};
//! # use sprout_parser::Span;
//!
//! let file_line = Span::new(4..12);
//! let child_line = Span::new(13..30);
//!
//! let diag = Diagnostic::error("`main.rs` is a file and cannot contain entries")
//!     .with_code(ErrorCode::E100)
//!     .with_label(child_line, "indented below a file")
//!     .with_secondary_label(file_line, "declared as a file here")
//!     .with_help("add a trailing `/` to declare a directory");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::{InvalidConfig, ParseError};
pub use severity::Severity;
