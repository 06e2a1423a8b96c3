//! Stack-based reconstruction of the tree from diagram lines.
//!
//! The parser keeps the chain of currently open directories on a stack. A
//! line at depth `d` closes everything deeper than `d` in one step, so the
//! stack always holds exactly the ancestors of the entry being declared.

use std::{collections::HashMap, path::PathBuf};

use log::{debug, trace};

use crate::{
    ParsedTree,
    config::ParseConfig,
    entry::Entry,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError, Severity},
    line::DiagramLine,
    span::Span,
};

/// Incremental parser state for one diagram.
pub(crate) struct TreeParser {
    config: ParseConfig,
    /// Names of the open directories, outermost first.
    stack: Vec<String>,
    entries: Vec<Entry>,
    diagnostics: DiagnosticCollector,
    /// Whether any declaring line has been seen yet.
    started: bool,
    /// The diagram opened with a `.` root line, so every depth is one less.
    dot_root: bool,
}

impl TreeParser {
    pub(crate) fn new(config: ParseConfig) -> Self {
        Self {
            config,
            stack: Vec::new(),
            entries: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
            started: false,
            dot_root: false,
        }
    }

    /// Declare the entry on `line`, reconciling the stack with its depth.
    pub(crate) fn push(&mut self, line: &DiagramLine<'_>) {
        let name = line.name();
        let first_line = !self.started;
        self.started = true;

        // `tree` prints the directory it was run in as a leading `.`.
        if first_line && name == "." && line.indent().is_empty() {
            trace!("Leading `.` read as the diagram root");
            self.dot_root = true;
            return;
        }

        if let Some(reason) = unsafe_name(name) {
            self.report(
                Diagnostic::new(self.severity(), format!("`{name}` {reason}"))
                    .with_code(ErrorCode::E102)
                    .with_label(line.name_span(), "this entry is skipped")
                    .with_help("entry names must stay inside the output root"),
            );
            return;
        }

        let mut depth = self.depth_of(line);

        if depth > self.stack.len() {
            self.reopen_previous_file(line);
        }

        if depth > self.stack.len() {
            let parent = self
                .stack
                .last()
                .map_or("the diagram root".to_string(), |p| format!("`{p}`"));
            let diagnostic = Diagnostic::new(
                self.severity(),
                format!("`{name}` is indented more than one level below its parent"),
            )
            .with_code(ErrorCode::E101)
            .with_label(line.name_span(), format!("placed directly under {parent}"))
            .with_help("indent nested entries one level at a time");
            self.report(diagnostic);
            depth = self.stack.len();
        }

        self.stack.truncate(depth);

        let names = self.stack.iter().cloned().chain([name.to_string()]);
        let entry = Entry::new(names, line.is_directory()).with_span(line.name_span());
        trace!(entry = entry.to_string(), depth; "Declared entry");

        if entry.is_directory() {
            self.stack.push(name.to_string());
        }
        self.entries.push(entry);
    }

    /// Finish parsing.
    ///
    /// Returns the entries with any recovered warnings, or every error found
    /// by a strict parse.
    pub(crate) fn finish(mut self) -> Result<ParsedTree, ParseError> {
        // Promotion can change an entry's kind after it was pushed, so
        // conflicts are only decided once every line is in.
        for diagnostic in conflicts(&self.entries, self.severity()) {
            self.report(diagnostic);
        }

        let warnings = self.diagnostics.finish()?;
        debug!(
            entries = self.entries.len(),
            warnings = warnings.len();
            "Diagram structure resolved"
        );
        Ok(ParsedTree::new(self.entries, warnings))
    }

    fn severity(&self) -> Severity {
        if self.config.is_strict() {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        debug!(diagnostic = diagnostic.to_string(); "Diagram finding");
        self.diagnostics.emit(diagnostic);
    }

    /// Nesting depth of `line`, flooring ragged indentation.
    fn depth_of(&mut self, line: &DiagramLine<'_>) -> usize {
        let unit = self.config.indent_width();
        let width = line.indent_width(unit);
        let levels = width / unit;
        let depth = if self.dot_root {
            levels.saturating_sub(1)
        } else {
            levels
        };

        if width % unit != 0 {
            let indent_start = line.span().start();
            let indent_span = Span::new(indent_start..indent_start + line.indent().len());
            self.report(
                Diagnostic::new(
                    self.severity(),
                    format!("indentation of {width} columns is not a multiple of {unit}"),
                )
                .with_code(ErrorCode::E103)
                .with_label(indent_span, format!("read as depth {depth}"))
                .with_help(format!(
                    "align nested entries to {unit} columns or change the indent width"
                )),
            );
        }

        depth
    }

    /// Turn the file declared right above `line` into a directory so that
    /// `line` can nest under it.
    fn reopen_previous_file(&mut self, line: &DiagramLine<'_>) {
        let open = self.stack.len();
        let Some(previous) = self.entries.last_mut() else {
            return;
        };
        if previous.is_directory() || previous.depth() != open {
            return;
        }

        previous.promote_to_directory();
        let file_name = previous.name().to_string();
        let file_span = previous.span();
        self.stack.push(file_name.clone());

        let help = if self.config.is_strict() {
            format!("add a trailing `/` to declare `{file_name}` as a directory")
        } else {
            format!("`{file_name}` is created as a directory; add a trailing `/` to say so")
        };
        self.report(
            Diagnostic::new(
                self.severity(),
                format!("`{file_name}` is a file and cannot contain entries"),
            )
            .with_code(ErrorCode::E100)
            .with_label(line.name_span(), "indented below a file")
            .with_secondary_label(file_span, "declared as a file here")
            .with_help(help),
        );
    }
}

/// Paths declared both as a file and as a directory, reported at every
/// declaration that disagrees with the first one.
fn conflicts(entries: &[Entry], severity: Severity) -> Vec<Diagnostic> {
    let mut first_of: HashMap<PathBuf, usize> = HashMap::new();
    let mut diagnostics = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let path = entry.path();
        let first = &entries[*first_of.entry(path.clone()).or_insert(index)];
        if first.is_directory() == entry.is_directory() {
            continue;
        }

        diagnostics.push(
            Diagnostic::new(
                severity,
                format!(
                    "`{}` is declared both as a file and as a directory",
                    path.display()
                ),
            )
            .with_code(ErrorCode::E104)
            .with_label(entry.span(), format!("declared as a {} here", kind(entry)))
            .with_secondary_label(first.span(), format!("first declared as a {}", kind(first)))
            .with_help("keep one declaration; the later one cannot be created"),
        );
    }

    diagnostics
}

fn kind(entry: &Entry) -> &'static str {
    if entry.is_directory() {
        "directory"
    } else {
        "file"
    }
}

/// Why `name` cannot be created below the output root, if it cannot.
fn unsafe_name(name: &str) -> Option<&'static str> {
    if name.starts_with(['/', '\\']) {
        return Some("is an absolute path");
    }
    if name == "." {
        return Some("refers to its own parent directory");
    }
    if name.split(['/', '\\']).any(|part| part == "..") {
        return Some("climbs out of its parent directory");
    }
    None
}
