//! Parser settings.

use crate::error::InvalidConfig;

/// Columns of decoration that make up one nesting level, as drawn by `tree`
/// (`├── `, `│   `).
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Settings for a single [`parse`](crate::parse) call.
///
/// - `indent_width` - columns per nesting level; a tab counts as one level
/// - `strict` - reject malformed diagrams instead of recovering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    indent_width: usize,
    strict: bool,
}

impl ParseConfig {
    /// Create a new parser configuration.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig::ZeroIndentWidth`] if `indent_width` is 0.
    pub fn new(indent_width: usize, strict: bool) -> Result<Self, InvalidConfig> {
        if indent_width == 0 {
            return Err(InvalidConfig::ZeroIndentWidth);
        }
        Ok(Self {
            indent_width,
            strict,
        })
    }

    /// Permissive configuration with the given indent width.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig::ZeroIndentWidth`] if `indent_width` is 0.
    pub fn with_indent_width(indent_width: usize) -> Result<Self, InvalidConfig> {
        Self::new(indent_width, false)
    }

    /// Same configuration with the strict policy switched on or off.
    pub fn strict(self, strict: bool) -> Self {
        Self { strict, ..self }
    }

    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            strict: false,
        }
    }
}
