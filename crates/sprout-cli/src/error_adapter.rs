//! Error adapter for converting SproutError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When a [`sprout_parser::error::ParseError`] contains multiple diagnostics, each
//! diagnostic is rendered independently. Warnings from a permissive parse
//! go through the same [`DiagnosticAdapter`].

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, Severity as MietteSeverity,
    SourceSpan,
};

use sprout::SproutError;
use sprout_parser::{
    Span,
    error::{Diagnostic, Severity},
};

/// Adapter for a single sprout diagnostic.
///
/// This adapter wraps a single [`Diagnostic`] and implements
/// [`MietteDiagnostic`] to enable rich error formatting in the CLI.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
    /// Diagram source for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(match self.diag.severity() {
            Severity::Error => MietteSeverity::Error,
            Severity::Warning => MietteSeverity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for non-diagnostic [`SproutError`] variants.
///
/// This adapter handles errors that don't carry source locations, such as
/// a missing input file, I/O errors, configuration errors and incomplete runs.
pub struct ErrorAdapter<'a>(pub &'a SproutError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            SproutError::InputNotFound(_) => "sprout::input",
            SproutError::Io(_) => "sprout::io",
            SproutError::Parse { .. } => return None,
            SproutError::Config(_) => "sprout::config",
            SproutError::Incomplete { .. } => "sprout::incomplete",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            SproutError::InputNotFound(_) => "the first argument must name a tree diagram file",
            SproutError::Incomplete { .. } => "the entries listed above were skipped",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a single diagnostic or a non-diagnostic error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A rich diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a sprout [`Span`] to a miette [`SourceSpan`].
fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`SproutError`] into a list of reportable errors.
///
/// For [`SproutError::Parse`], this returns one [`Reportable`] for
/// each diagnostic in the error. For other error variants, this returns a
/// single [`Reportable`].
pub fn to_reportables(err: &SproutError) -> Vec<Reportable<'_>> {
    match err {
        SproutError::Parse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Render a diagnostic to a string with miette's graphical handler.
///
/// Falls back to the plain message if rendering fails.
pub fn render(diagnostic: &dyn MietteDiagnostic) -> String {
    let mut writer = String::new();
    match GraphicalReportHandler::new().render_report(&mut writer, diagnostic) {
        Ok(()) => writer,
        Err(_) => diagnostic.to_string(),
    }
}

/// Render every report for `err`, one string per diagnostic.
pub fn render_error(err: &SproutError) -> Vec<String> {
    to_reportables(err)
        .iter()
        .map(|reportable| render(reportable))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use sprout_parser::error::{ErrorCode, ParseError};

    use super::*;

    #[test]
    fn test_single_diagnostic() {
        let diag = Diagnostic::error("line is indented below a file")
            .with_code(ErrorCode::E100)
            .with_label(Span::new(6..11), "here")
            .with_help("mark the parent with a trailing '/'");
        let parse_err = ParseError::from(diag);
        let err = SproutError::new_parse_error(parse_err, "a.txt\n    b.txt\n");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Diagnostic(d) => {
                assert_eq!(d.to_string(), "line is indented below a file");
                assert_eq!(d.code().unwrap().to_string(), "E100");
                assert_eq!(d.severity(), Some(MietteSeverity::Error));
            }
            Reportable::Error(_) => panic!("Expected Diagnostic"),
        }
    }

    #[test]
    fn test_multiple_diagnostics() {
        let diags = vec![
            Diagnostic::error("first error")
                .with_code(ErrorCode::E100)
                .with_label(Span::new(0..5), "first"),
            Diagnostic::error("second error")
                .with_code(ErrorCode::E103)
                .with_label(Span::new(10..15), "second"),
        ];
        let parse_err = ParseError::from(diags);
        let err = SproutError::new_parse_error(parse_err, "source code here...");

        let reportables = to_reportables(&err);

        // Each diagnostic is separate
        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "first error");
        assert_eq!(reportables[1].to_string(), "second error");
    }

    #[test]
    fn test_non_parse_error() {
        let err = SproutError::InputNotFound(PathBuf::from("tree.txt"));

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.code().unwrap().to_string(), "sprout::input");
                assert!(e.help().is_some());
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_warning_severity() {
        let diag = Diagnostic::warning("inconsistent indentation")
            .with_code(ErrorCode::E103)
            .with_label(Span::new(0..3), "here");

        let adapter = DiagnosticAdapter::new(&diag, "  a\n");

        assert_eq!(adapter.severity(), Some(MietteSeverity::Warning));
    }

    #[test]
    fn test_all_labels_returned() {
        let diag = Diagnostic::error("line is indented below a file")
            .with_label(Span::new(6..11), "indented here")
            .with_secondary_label(Span::new(0..5), "declared as a file here");

        let adapter = DiagnosticAdapter::new(&diag, "a.txt\n    b.txt\n");

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].label(), Some("indented here"));
        assert!(labels[0].primary());
        assert_eq!(labels[1].label(), Some("declared as a file here"));
        assert!(!labels[1].primary());
    }

    #[test]
    fn test_render_includes_message() {
        let diag = Diagnostic::warning("inconsistent indentation").with_label(Span::new(0..3), "here");
        let adapter = DiagnosticAdapter::new(&diag, "  a\n");

        let rendered = render(&adapter);

        assert!(rendered.contains("inconsistent indentation"));
    }

    #[test]
    fn test_render_error_one_report_per_diagnostic() {
        let diags = vec![
            Diagnostic::error("first error").with_label(Span::new(0..1), "here"),
            Diagnostic::error("second error").with_label(Span::new(2..3), "here"),
        ];
        let err = SproutError::new_parse_error(ParseError::from(diags), "a\nb\n");

        let rendered = render_error(&err);

        assert_eq!(rendered.len(), 2);
        assert!(rendered[0].contains("first error"));
        assert!(rendered[1].contains("second error"));
    }
}
