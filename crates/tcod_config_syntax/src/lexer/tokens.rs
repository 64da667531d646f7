//! Token types for the config lexer.

use std::fmt;

use crate::ast::Span;
use crate::values::Color;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Value type named by a `*_t` keyword (`int_t`, `struct_t`, ...).
///
/// These only appear in dynamic declarations, which the parser rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Struct,
    Bool,
    Char,
    Int,
    Float,
    String,
    Color,
    Dice,
}

impl ValueType {
    /// Resolve a `*_t` spelling.
    pub fn from_keyword(spelling: &str) -> Option<Self> {
        Some(match spelling {
            "struct_t" => ValueType::Struct,
            "bool_t" => ValueType::Bool,
            "char_t" => ValueType::Char,
            "int_t" => ValueType::Int,
            "float_t" => ValueType::Float,
            "string_t" => ValueType::String,
            "color_t" => ValueType::Color,
            "dice_t" => ValueType::Dice,
            _ => return None,
        })
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            ValueType::Struct => "struct_t",
            ValueType::Bool => "bool_t",
            ValueType::Char => "char_t",
            ValueType::Int => "int_t",
            ValueType::Float => "float_t",
            ValueType::String => "string_t",
            ValueType::Color => "color_t",
            ValueType::Dice => "dice_t",
        }
    }
}

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Identifiers and Literals ==========
    Ident(String),
    TypeKeyword(ValueType),
    /// Unescaped contents of a `"..."` literal.
    String(String),
    Char(char),
    Int(i128),
    Float(f64),
    Color(Color),

    // ========== Punctuation ==========
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Assign,
    Comma,

    // ========== Special ==========
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "identifier '{}'", name),
            TokenKind::TypeKeyword(t) => write!(f, "'{}'", t.keyword()),
            TokenKind::String(s) => write!(f, "string {:?}", s),
            TokenKind::Char(c) => write!(f, "char {:?}", c),
            TokenKind::Int(i) => write!(f, "integer {}", i),
            TokenKind::Float(x) => write!(f, "float {}", x),
            TokenKind::Color(c) => write!(f, "color {}", c),
            TokenKind::LBrace => f.write_str("'{'"),
            TokenKind::RBrace => f.write_str("'}'"),
            TokenKind::LBracket => f.write_str("'['"),
            TokenKind::RBracket => f.write_str("']'"),
            TokenKind::Assign => f.write_str("'='"),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}
