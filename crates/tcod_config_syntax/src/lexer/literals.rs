//! Literal scanning for the config lexer
//!
//! Handles strings, chars, decimal/hex integers, floats and `#RRGGBB` colors.

use super::Lexer;
use super::tokens::TokenKind;
use crate::ast::Span;
use crate::diagnostics::{SyntaxError, errors};
use crate::values::Color;

// ============================================================================
// Escape sequence handling
// ============================================================================

/// Result of processing an escape sequence
enum EscapeResult {
    Char(char),
    Invalid(String),
    Eof,
}

impl<'a> Lexer<'a> {
    /// Process an escape sequence shared by strings and chars.
    /// Called after consuming the backslash.
    ///
    /// Numeric escapes (`\xHH`, `\ooo`) name a single byte.
    fn scan_escape(&mut self) -> EscapeResult {
        match self.advance() {
            Some('n') => EscapeResult::Char('\n'),
            Some('t') => EscapeResult::Char('\t'),
            Some('r') => EscapeResult::Char('\r'),
            Some('\\') => EscapeResult::Char('\\'),
            Some('"') => EscapeResult::Char('"'),
            Some('\'') => EscapeResult::Char('\''),
            Some('x') => {
                let digits = self.take_while(|c| c.is_ascii_hexdigit());
                if digits.is_empty() {
                    return EscapeResult::Invalid("Hex escape needs at least one digit".to_string());
                }
                match u8::from_str_radix(&digits, 16) {
                    Ok(byte) => EscapeResult::Char(byte as char),
                    Err(_) => EscapeResult::Invalid(format!("Hex escape '\\x{}' does not fit in a byte", digits)),
                }
            }
            Some(c @ '0'..='7') => {
                let mut digits = c.to_string();
                digits.push_str(&self.take_while(|c| ('0'..='7').contains(&c)));
                match u8::from_str_radix(&digits, 8) {
                    Ok(byte) => EscapeResult::Char(byte as char),
                    Err(_) => EscapeResult::Invalid(format!("Octal escape '\\{}' does not fit in a byte", digits)),
                }
            }
            Some(c) => EscapeResult::Invalid(format!("Unknown escape sequence '\\{}'", c)),
            None => EscapeResult::Eof,
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            out.push(c);
            self.advance();
        }
        out
    }
}

// ============================================================================
// String and char scanning
// ============================================================================

impl<'a> Lexer<'a> {
    pub(super) fn scan_string(&mut self, start: usize) {
        let mut value = String::new();

        loop {
            match self.advance() {
                None => {
                    self.errors
                        .push(errors::unterminated("string", Span::new(start, self.current_pos)));
                    return;
                }
                Some('"') => break,
                Some('\\') => {
                    let escape_start = self.current_pos - 1;
                    match self.scan_escape() {
                        EscapeResult::Char(c) => value.push(c),
                        EscapeResult::Invalid(message) => self.error(message, escape_start),
                        EscapeResult::Eof => {
                            self.errors
                                .push(errors::unterminated("string", Span::new(start, self.current_pos)));
                            return;
                        }
                    }
                }
                Some(c) => value.push(c),
            }
        }

        self.add_token(TokenKind::String(value), start);
    }

    pub(super) fn scan_char(&mut self, start: usize) {
        let value = match self.advance() {
            None | Some('\n') => {
                self.errors
                    .push(errors::unterminated("char literal", Span::new(start, self.current_pos)));
                return;
            }
            Some('\'') => {
                self.error("Empty char literal", start);
                return;
            }
            Some('\\') => match self.scan_escape() {
                EscapeResult::Char(c) => c,
                EscapeResult::Invalid(message) => {
                    self.skip_rest_of_char();
                    self.error(message, start);
                    return;
                }
                EscapeResult::Eof => {
                    self.errors
                        .push(errors::unterminated("char literal", Span::new(start, self.current_pos)));
                    return;
                }
            },
            Some(c) => c,
        };

        if !self.match_char('\'') {
            self.skip_rest_of_char();
            self.errors.push(
                SyntaxError::new(
                    "Char literal must contain exactly one character",
                    Span::new(start, self.current_pos),
                )
                .with_hint("Use double quotes for strings: \"text\""),
            );
            return;
        }

        self.add_token(TokenKind::Char(value), start);
    }

    /// Consume up to and including the closing quote of a malformed char literal, stopping at end of line.
    fn skip_rest_of_char(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                return;
            }
            self.advance();
            if c == '\'' {
                return;
            }
        }
    }
}

// ============================================================================
// Numbers and colors
// ============================================================================

/// Integer literals must fit in `i64` or `u64`.
const INT_RANGE: std::ops::RangeInclusive<i128> = (i64::MIN as i128)..=(u64::MAX as i128);

impl<'a> Lexer<'a> {
    /// Scan an integer or float. `first` is the already-consumed `-`, `.` or digit.
    pub(super) fn scan_number(&mut self, start: usize, first: char) {
        let negative = first == '-';
        let lead = if negative {
            // Dispatch guarantees a digit or '.' follows the sign.
            match self.advance() {
                Some(c) => c,
                None => return,
            }
        } else {
            first
        };

        if lead == '0' && matches!(self.peek(), Some('x' | 'X')) && self.peek_next().is_some_and(|c| c.is_ascii_hexdigit())
        {
            self.advance();
            let digits = self.take_while(|c| c.is_ascii_hexdigit());
            match i128::from_str_radix(&digits, 16)
                .ok()
                .map(|v| if negative { -v } else { v })
                .filter(|v| INT_RANGE.contains(v))
            {
                Some(v) => self.add_token(TokenKind::Int(v), start),
                None => self.error("Integer literal out of range", start),
            }
            return;
        }

        let mut is_float = lead == '.';
        self.take_while(|c| c.is_ascii_digit());
        if !is_float && self.peek() == Some('.') {
            self.advance();
            is_float = true;
        }
        if is_float {
            self.take_while(|c| c.is_ascii_digit());
        }

        let text = &self.source[start..self.current_pos];
        if is_float {
            match text.parse::<f64>() {
                Ok(v) if v.is_finite() => self.add_token(TokenKind::Float(v), start),
                Ok(_) => self.error("Float literal out of range", start),
                Err(_) => self.error(format!("Invalid float literal '{}'", text), start),
            }
        } else {
            match text.parse::<i128>() {
                Ok(v) if INT_RANGE.contains(&v) => self.add_token(TokenKind::Int(v), start),
                _ => self.error("Integer literal out of range", start),
            }
        }
    }

    /// Scan `#RRGGBB`. Called after consuming `#`.
    pub(super) fn scan_color(&mut self, start: usize) {
        let digits = self.take_while(|c| c.is_ascii_alphanumeric());
        match Color::from_hex(&digits) {
            Ok(color) => self.add_token(TokenKind::Color(color), start),
            Err(_) => self.errors.push(
                SyntaxError::new(
                    format!("Invalid color literal '#{}'", digits),
                    Span::new(start, self.current_pos),
                )
                .with_hint("Colors are written as six hex digits: #RRGGBB"),
            ),
        }
    }
}
