#![forbid(unsafe_code)]
//! Serde support for libtcod-style config files.
//!
//! Config files describe typed struct instances with fields, flags and nested structs:
//!
//! ```text
//! item_type "sword" {
//!     damage = 4
//!     two_handed
//!     tint = #C0C0C0
//! }
//! ```
//!
//! This crate deserializes them into Rust types with [`from_str`], and provides a formatter and the `tcod-config`
//! command-line tool. Lexing and parsing live in the [`syntax`] crate.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod de;
pub mod format;

pub use tcod_config_syntax as syntax;
pub use tcod_config_syntax::{Color, Dice, Span, SyntaxError};

pub use de::{Deserializer, DeserializerConfig, Error, Result, from_reader, from_slice, from_str, from_str_with_config};
pub use format::{
    FormatConfig, check_formatted, check_formatted_with_config, format_diff, format_diff_with_config, format_source,
    format_source_with_config,
};
