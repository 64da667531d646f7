//! Syntax diagnostics with source locations.
//!
//! `SyntaxError` is produced by both the lexer and the parser. It implements [`miette::Diagnostic`] so callers can
//! render it against the source text with a labelled span.

use std::fmt;

use crate::ast::Span;

/// A lexing or parsing error with location information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

impl miette::Diagnostic for SyntaxError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("tcod_config::syntax"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if self.hints.is_empty() && self.notes.is_empty() {
            return None;
        }
        let lines: Vec<String> = self
            .notes
            .iter()
            .map(|n| format!("note: {n}"))
            .chain(self.hints.iter().cloned())
            .collect();
        Some(Box::new(lines.join("\n")))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(miette::LabeledSpan::new_with_span(
            Some("here".to_string()),
            self.span,
        ))))
    }
}

/// Get line number, column number, and line text for a byte offset.
///
/// Line and column are 1-based; the column counts bytes.
pub fn line_col(source: &str, offset: usize) -> (usize, usize, &str) {
    let offset = offset.min(source.len());
    let mut line_num = 1;
    let mut line_start = 0;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line_num += 1;
            line_start = i + 1;
        }
    }

    let line_end = source[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(source.len());

    let line_text = &source[line_start..line_end];
    let col_num = offset - line_start + 1;

    (line_num, col_num, line_text)
}

// ============================================================================
// Error catalog
// ============================================================================

/// Constructors for the errors the parser reports in more than one place.
pub mod errors {
    use super::*;

    pub fn expected_token(expected: &str, found: &str, span: Span) -> SyntaxError {
        SyntaxError::new(format!("Expected {}, found {}", expected, found), span)
    }

    pub fn dynamic_declaration(keyword: &str, span: Span) -> SyntaxError {
        SyntaxError::new(format!("Dynamic declarations are not supported: '{}'", keyword), span)
            .with_note("Struct and field declarations are taken from the Rust types being deserialized")
            .with_hint("Remove the declaration and assign the field directly: name = value")
    }

    pub fn unterminated(what: &str, span: Span) -> SyntaxError {
        SyntaxError::new(format!("Unterminated {}", what), span)
    }
}
