//! Parsed declarations.

use std::{fmt, path::PathBuf};

use crate::span::Span;

/// One file or directory declared by a tree diagram.
///
/// `names` holds the declared names from the diagram root down to this
/// entry. A declared name may itself contain `/` (e.g. `src/bin/`), so the
/// number of names is the nesting depth in the diagram, not necessarily
/// the number of path components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    names: Vec<String>,
    is_directory: bool,
    span: Span,
}

impl Entry {
    /// Create an entry from its ancestor chain and kind.
    pub fn new<I, S>(names: I, is_directory: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            is_directory,
            span: Span::default(),
        }
    }

    /// Shorthand for a directory entry.
    pub fn directory<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names, true)
    }

    /// Shorthand for a file entry.
    pub fn file<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names, false)
    }

    pub(crate) fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Declared names from the root down to this entry.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The entry's own name.
    pub fn name(&self) -> &str {
        self.names.last().map(String::as_str).unwrap_or_default()
    }

    /// Nesting depth in the diagram; top-level entries have depth 0.
    pub fn depth(&self) -> usize {
        self.names.len().saturating_sub(1)
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    pub fn is_file(&self) -> bool {
        !self.is_directory
    }

    /// The path relative to the diagram root.
    pub fn path(&self) -> PathBuf {
        self.names.iter().collect()
    }

    /// The path of the enclosing directory, empty for top-level entries.
    pub fn parent(&self) -> PathBuf {
        self.names[..self.depth()].iter().collect()
    }

    /// Span of the declaring line in the source; empty for entries that
    /// were not parsed.
    pub fn span(&self) -> Span {
        self.span
    }

    pub(crate) fn promote_to_directory(&mut self) {
        self.is_directory = true;
    }
}

impl fmt::Display for Entry {
    /// `src/utils/` for directories, `src/main.rs` for files.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.join("/"))?;
        if self.is_directory {
            write!(f, "/")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_entry_paths() {
        let entry = Entry::file(["src", "utils", "helpers.py"]);

        assert_eq!(entry.name(), "helpers.py");
        assert_eq!(entry.depth(), 2);
        assert_eq!(entry.path(), Path::new("src/utils/helpers.py"));
        assert_eq!(entry.parent(), Path::new("src/utils"));
        assert!(entry.is_file());
    }

    #[test]
    fn test_top_level_parent_is_empty() {
        let entry = Entry::directory(["src"]);

        assert_eq!(entry.depth(), 0);
        assert_eq!(entry.parent(), PathBuf::new());
    }

    #[test]
    fn test_display_marks_directories() {
        assert_eq!(Entry::directory(["src", "utils"]).to_string(), "src/utils/");
        assert_eq!(Entry::file(["src", "main.py"]).to_string(), "src/main.py");
    }

    #[test]
    fn test_names_with_slashes() {
        let entry = Entry::file(["src/bin", "cli.rs"]);

        assert_eq!(entry.depth(), 1);
        assert_eq!(entry.path(), Path::new("src/bin/cli.rs"));
    }
}
