//! Parser for libtcod-style config files
//!
//! Converts a token stream into a [`Document`].
//!
//! ## Examples
//!
//! ```rust
//! use tcod_config_syntax::{lexer, parser};
//!
//! let source = "monster \"orc\" { hp = 10 aggressive }";
//! let tokens = lexer::lex(source).unwrap();
//! let document = parser::parse(&tokens).unwrap();
//! assert_eq!(document.structs[0].node.members.len(), 2);
//! ```

use crate::ast::*;
use crate::diagnostics::{SyntaxError, errors};
use crate::lexer::{Token, TokenKind};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/members.rs");
include!("parser/values.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
