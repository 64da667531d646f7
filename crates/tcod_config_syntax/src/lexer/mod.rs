//! Lexer for libtcod-style config files
//!
//! Handles tokenization including:
//! - Identifiers and `*_t` type keywords
//! - Literals (string, char, decimal/hex integer, float, `#RRGGBB` color)
//! - Punctuation (`{ } [ ] = ,`)
//! - `//` line comments and `/* */` block comments
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, ValueType)
//! - `literals` - String/char/number/color scanning

mod literals;
pub mod tokens;

pub use tokens::{Token, TokenKind, ValueType};

use crate::ast::Span;
use crate::diagnostics::{SyntaxError, errors};

/// Lexer for config source text.
///
/// Converts source text into a stream of tokens. Errors are collected rather than aborting, so one pass reports
/// every malformed literal in the file.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    tokens: Vec<Token>,
    errors: Vec<SyntaxError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// Returns a vector of tokens on success, or a vector of errors on failure.
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<SyntaxError>> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
        ));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next(); // skip current
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn error(&mut self, message: impl Into<String>, start: usize) {
        self.errors
            .push(SyntaxError::new(message, Span::new(start, self.current_pos)));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            ' ' | '\t' | '\r' | '\n' => {}

            '/' if self.match_char('/') => self.skip_line_comment(),
            '/' if self.match_char('*') => self.skip_block_comment(start),

            '{' => self.add_token(TokenKind::LBrace, start),
            '}' => self.add_token(TokenKind::RBrace, start),
            '[' => self.add_token(TokenKind::LBracket, start),
            ']' => self.add_token(TokenKind::RBracket, start),
            '=' => self.add_token(TokenKind::Assign, start),
            ',' => self.add_token(TokenKind::Comma, start),

            '"' => self.scan_string(start),
            '\'' => self.scan_char(start),
            '#' => self.scan_color(start),

            '0'..='9' => self.scan_number(start, c),
            '-' | '.' if self.peek().is_some_and(|n| n.is_ascii_digit()) => self.scan_number(start, c),
            '-' if self.peek() == Some('.') && self.peek_next().is_some_and(|n| n.is_ascii_digit()) => {
                self.scan_number(start, c)
            }

            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => self.error(format!("Unexpected character '{}'", c), start),
        }
    }

    // ========================================================================
    // Comments
    // ========================================================================

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip a `/* ... */` comment. Block comments do not nest.
    fn skip_block_comment(&mut self, start: usize) {
        loop {
            match self.advance() {
                None => {
                    self.errors.push(errors::unterminated(
                        "block comment",
                        Span::new(start, self.current_pos),
                    ));
                    return;
                }
                Some('*') if self.match_char('/') => return,
                Some(_) => {}
            }
        }
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];

        if let Some(value_type) = ValueType::from_keyword(spelling) {
            self.add_token(TokenKind::TypeKeyword(value_type), start);
        } else {
            self.add_token(TokenKind::Ident(spelling.to_string()), start);
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<SyntaxError>> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================
