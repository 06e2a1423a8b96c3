//! Line-level grammar for tree diagrams.
//!
//! A diagram line is `indent name [/] [# comment]`, where `indent` is any run
//! of box-drawing glyphs and blanks. The grammar never fails: lines that
//! carry no name (blank, decoration-only or comment-only) are simply not
//! [`DiagramLine`]s.

use winnow::{
    Parser as _,
    combinator::{opt, preceded},
    error::ModalResult,
    token::{take_till, take_while},
};

use crate::span::Span;

/// Characters that make up the indentation of a line.
///
/// `\u{a0}` is the no-break space that `tree` emits after `│`.
pub const DECORATION: [char; 7] = ['│', '├', '└', '─', ' ', '\t', '\u{a0}'];

/// Marks the start of a trailing comment.
pub const COMMENT_MARKER: char = '#';

/// Marks a directory when it ends a name.
pub const DIRECTORY_MARKER: char = '/';

fn is_decoration(c: char) -> bool {
    DECORATION.contains(&c)
}

fn indent_prefix<'src>(input: &mut &'src str) -> ModalResult<&'src str> {
    take_while(0.., is_decoration).parse_next(input)
}

fn payload_text<'src>(input: &mut &'src str) -> ModalResult<&'src str> {
    take_till(0.., COMMENT_MARKER).parse_next(input)
}

fn trailing_comment<'src>(input: &mut &'src str) -> ModalResult<Option<&'src str>> {
    opt(preceded(COMMENT_MARKER, take_while(0.., |_: char| true))).parse_next(input)
}

/// One declaring line of a tree diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramLine<'src> {
    indent: &'src str,
    name: &'src str,
    is_directory: bool,
    comment: Option<&'src str>,
    span: Span,
    name_span: Span,
}

impl<'src> DiagramLine<'src> {
    /// Parse a single line that starts at byte `offset` of the source.
    ///
    /// Returns `None` for lines that declare nothing.
    pub fn parse(text: &'src str, offset: usize) -> Option<Self> {
        let mut input = text;
        let (indent, payload, comment) = (indent_prefix, payload_text, trailing_comment)
            .parse_next(&mut input)
            .ok()?;

        let trimmed = payload.trim();
        let name = trimmed.trim_end_matches(DIRECTORY_MARKER).trim_end();
        if name.is_empty() {
            return None;
        }
        let is_directory = name.len() != trimmed.len();

        let name_start = indent.len() + (payload.len() - payload.trim_start().len());
        Some(Self {
            indent,
            name,
            is_directory,
            comment: comment.map(str::trim).filter(|c| !c.is_empty()),
            span: Span::new(offset..offset + text.len()),
            name_span: Span::new(name_start..name_start + trimmed.len()).offset(offset),
        })
    }

    /// The leading decoration.
    pub fn indent(&self) -> &'src str {
        self.indent
    }

    /// Width of the leading decoration in columns.
    ///
    /// Every decoration character is one column, except a tab which counts
    /// as `tab_width` columns.
    pub fn indent_width(&self, tab_width: usize) -> usize {
        self.indent
            .chars()
            .map(|c| if c == '\t' { tab_width } else { 1 })
            .sum()
    }

    /// The declared name without directory marker or comment.
    pub fn name(&self) -> &'src str {
        self.name
    }

    /// Whether the name carried a trailing `/`.
    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// The comment text, if any.
    pub fn comment(&self) -> Option<&'src str> {
        self.comment
    }

    /// Span of the whole line.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Span of the name, including the directory marker.
    pub fn name_span(&self) -> Span {
        self.name_span
    }
}

/// Iterate over the declaring lines of `source`.
///
/// Accepts both `\n` and `\r\n` line endings. Spans are byte offsets into
/// `source`.
pub fn lines(source: &str) -> impl Iterator<Item = DiagramLine<'_>> {
    let mut offset = 0;
    source.split_inclusive('\n').filter_map(move |raw| {
        let start = offset;
        offset += raw.len();
        let text = raw.strip_suffix('\n').unwrap_or(raw);
        let text = text.strip_suffix('\r').unwrap_or(text);
        DiagramLine::parse(text, start)
    })
}
