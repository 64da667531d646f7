//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites in the parser and the deserializer.

use crate::lexer::{Token, TokenKind};

impl TokenKind {
    /// Return the identifier spelling, if this is an identifier token.
    pub fn ident(&self) -> Option<&str> {
        match self {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Return `true` if this is an identifier with the given spelling.
    pub fn is_ident(&self, spelling: &str) -> bool {
        matches!(self, TokenKind::Ident(name) if name == spelling)
    }

    /// Return `true` if this token can begin a value on the right-hand side of `=`.
    pub fn starts_value(&self) -> bool {
        matches!(
            self,
            TokenKind::String(_)
                | TokenKind::Char(_)
                | TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::Color(_)
                | TokenKind::LBracket
        ) || self.is_ident("true")
            || self.is_ident("false")
    }

    /// Return `true` if an identifier followed by this token opens a struct instance.
    pub fn opens_struct_after_ident(&self) -> bool {
        matches!(self, TokenKind::String(_) | TokenKind::LBrace)
    }

    /// Return `true` if an identifier followed by this token is a bare flag.
    pub fn ends_flag_after_ident(&self) -> bool {
        matches!(self, TokenKind::Ident(_) | TokenKind::RBrace | TokenKind::TypeKeyword(_))
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.ident()`.
    pub fn ident(&self) -> Option<&str> {
        self.kind.ident()
    }
}
