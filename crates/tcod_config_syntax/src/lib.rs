//! Shared syntax frontend for libtcod-style config files: lexer, parser, syntax tree, diagnostics.
//!
//! This crate is dependency-light and intended for reuse by the serde deserializer, the formatter and the CLI.
//!
//! ## Notes
//! - This crate is intentionally “syntax-only”: it knows nothing about the Rust types a file is deserialized into.
//! - The libtcod value types (`Color`, `Dice`) live here because both the lexer and downstream crates need them.
//!
//! ## Examples
//! ```rust
//! use tcod_config_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("item \"sword\" { damage = 3 }").unwrap();
//! let document = parser::parse(&tokens).unwrap();
//! assert_eq!(document.structs.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
pub mod values;

pub use ast::{Span, Spanned};
pub use diagnostics::SyntaxError;
pub use values::{Color, Dice};
