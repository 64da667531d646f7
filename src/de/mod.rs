//! Serde deserializer for libtcod-style config files.
//!
//! The deserializer works directly on the token stream produced by [`tcod_config_syntax::lexer`]; it never builds a
//! syntax tree. Struct instances map onto Rust structs by type name:
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize, PartialEq)]
//! #[serde(rename = "item_type")]
//! struct ItemType {
//!     name: String,
//!     damage: i32,
//!     #[serde(default)]
//!     two_handed: bool,
//! }
//!
//! let item: ItemType = tcod_config::from_str(r#"item_type "sword" { damage = 4 two_handed }"#).unwrap();
//! assert_eq!(item.name, "sword");
//! assert!(item.two_handed);
//! ```
//!
//! ## Mapping rules
//! - The instance name (`"sword"` above) is delivered as the field `name`, or `""` when absent.
//! - `field = value` assigns a scalar, string, color or `[list]`.
//! - A bare identifier is a flag and deserializes as `true`.
//! - A nested struct is delivered under its type identifier; a `Vec` field collects a run of consecutive structs
//!   of the same type, so instances of one type must be grouped together.

mod access;
mod config;
mod error;
mod flag;

pub use config::DeserializerConfig;
pub use error::{Error, Result};

use std::borrow::Cow;
use std::io::Read;

use serde::de::value::StringDeserializer;
use serde::de::{self, Visitor};
use serde::forward_to_deserialize_any;
use tcod_config_syntax::lexer::{self, Token, TokenKind};
use tcod_config_syntax::Span;

use access::{ListAccess, StructAccess, StructRunAccess};

// ============================================================================
// Entry points
// ============================================================================

/// Deserialize an instance of `T` from a string of config text.
///
/// The whole input must be consumed; anything after the root value is an error unless the config allows it.
#[tracing::instrument(skip_all, fields(source_len = s.len(), target = std::any::type_name::<T>()))]
pub fn from_str<'de, T>(s: &'de str) -> Result<T>
where
    T: de::Deserialize<'de>,
{
    from_str_with_config(s, DeserializerConfig::default())
}

/// Like [`from_str`], with explicit [`DeserializerConfig`].
pub fn from_str_with_config<'de, T>(s: &'de str, config: DeserializerConfig) -> Result<T>
where
    T: de::Deserialize<'de>,
{
    let mut deserializer = Deserializer::with_config(s, config)?;
    let value = T::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}

/// Deserialize an instance of `T` from UTF-8 bytes.
pub fn from_slice<'de, T>(bytes: &'de [u8]) -> Result<T>
where
    T: de::Deserialize<'de>,
{
    from_str(std::str::from_utf8(bytes)?)
}

/// Deserialize an instance of `T` from an I/O stream.
///
/// The stream is read to the end before deserializing, so `T` cannot borrow from the input.
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: Read,
    T: de::DeserializeOwned,
{
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    from_str(&source)
}

// ============================================================================
// Deserializer
// ============================================================================

/// A serde deserializer over a lexed config source.
pub struct Deserializer<'de> {
    source: &'de str,
    tokens: Vec<Token>,
    pos: usize,
    config: DeserializerConfig,
}

impl<'de> Deserializer<'de> {
    /// Lex `source` with the default configuration.
    ///
    /// ## Errors
    /// Returns [`Error::Syntax`] with every lexer error if the source cannot be tokenized.
    pub fn new(source: &'de str) -> Result<Self> {
        Self::with_config(source, DeserializerConfig::default())
    }

    /// Lex `source` with a custom configuration.
    pub fn with_config(source: &'de str, config: DeserializerConfig) -> Result<Self> {
        let tokens = lexer::lex(source)?;
        tracing::trace!(token_count = tokens.len(), %config, "lexed config source");
        Ok(Self {
            source,
            tokens,
            pos: 0,
            config,
        })
    }

    /// Check that the whole input was consumed.
    pub fn end(&self) -> Result<()> {
        match self.peek_kind() {
            TokenKind::Eof => Ok(()),
            _ if self.config.allow_trailing_tokens => Ok(()),
            found => Err(Error::TrailingTokens {
                found: found.to_string(),
                span: self.span(),
            }),
        }
    }

    // ========================================================================
    // Token cursor
    // ========================================================================

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    pub(crate) fn peek_next_kind(&self) -> &TokenKind {
        &self.tokens[(self.pos + 1).min(self.tokens.len() - 1)].kind
    }

    pub(crate) fn span(&self) -> Span {
        self.peek().span
    }

    pub(crate) fn advance(&mut self) {
        if !matches!(self.peek_kind(), TokenKind::Eof) {
            self.pos += 1;
        }
    }

    /// Source text of the current token.
    pub(crate) fn raw(&self) -> &'de str {
        let source = self.source;
        let span = self.span();
        &source[span.start..span.end]
    }

    pub(crate) fn unexpected(&self, expected: impl Into<String>) -> Error {
        Error::UnexpectedToken {
            found: self.peek_kind().to_string(),
            expected: expected.into(),
            span: self.span(),
        }
    }

    // ========================================================================
    // Value helpers
    // ========================================================================

    /// Consume one string literal. Borrows from the source when the literal has no escapes.
    fn single_string(&mut self) -> Cow<'de, str> {
        let raw = self.raw();
        let value = match self.peek_kind() {
            TokenKind::String(s) if raw.len() >= 2 && &raw[1..raw.len() - 1] == s => Cow::Borrowed(&raw[1..raw.len() - 1]),
            TokenKind::String(s) => Cow::Owned(s.clone()),
            _ => Cow::Borrowed(""),
        };
        self.advance();
        value
    }

    /// Consume a run of adjacent string literals and concatenate them.
    fn string_value(&mut self) -> Cow<'de, str> {
        let mut value = self.single_string();
        while let TokenKind::String(_) = self.peek_kind() {
            let next = self.single_string();
            value.to_mut().push_str(&next);
        }
        value
    }

    fn parse_integer<T: TryFrom<i128>>(&mut self, target: &'static str) -> Result<T> {
        match *self.peek_kind() {
            TokenKind::Int(value) => {
                let span = self.span();
                let result = T::try_from(value).map_err(|_| Error::NumberOutOfRange { value, target, span })?;
                self.advance();
                Ok(result)
            }
            _ => Err(self.unexpected(format!("an integer ({})", target))),
        }
    }

    fn parse_float(&mut self) -> Result<f64> {
        let value = match *self.peek_kind() {
            TokenKind::Float(f) => f,
            TokenKind::Int(i) => i as f64,
            _ => return Err(self.unexpected("a number")),
        };
        self.advance();
        Ok(value)
    }

    /// Returns `true` if the cursor is on `IDENT` followed by a string or `{`.
    pub(crate) fn at_struct_start(&self) -> bool {
        self.peek_kind().ident().is_some() && self.peek_next_kind().opens_struct_after_ident()
    }

    /// Consume `type_name ["name"] {` and return the header span and instance name.
    ///
    /// When `expected` is given, the type identifier must match it.
    fn struct_header(&mut self, expected: Option<&'static str>) -> Result<(Span, Option<Cow<'de, str>>)> {
        let span = self.span();
        let found = match self.peek_kind() {
            TokenKind::Ident(_) => self.raw(),
            _ => return Err(self.unexpected(expected.map_or_else(|| "a struct".to_string(), |e| format!("struct '{}'", e)))),
        };
        if let Some(expected) = expected {
            if found != expected {
                return Err(Error::UnexpectedStruct {
                    found: found.to_string(),
                    expected: expected.to_string(),
                    span,
                });
            }
        }
        self.advance();

        let name = match self.peek_kind() {
            TokenKind::String(_) => Some(self.single_string()),
            _ => None,
        };

        if !matches!(self.peek_kind(), TokenKind::LBrace) {
            return Err(self.unexpected("'{' to open the struct body"));
        }
        self.advance();

        tracing::debug!(
            type_name = found,
            instance = name.as_deref().unwrap_or(""),
            "entering struct"
        );
        Ok((span, name))
    }

    /// Hand the struct body to `visitor` and consume the closing brace.
    fn struct_body<V>(&mut self, span: Span, instance_name: Option<Cow<'de, str>>, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = visitor
            .visit_map(StructAccess::new(self, instance_name))
            .map_err(|e| e.or_span(span))?;

        if !matches!(self.peek_kind(), TokenKind::RBrace) {
            return Err(self.unexpected("'}' to close the struct"));
        }
        self.advance();
        Ok(value)
    }
}

// ============================================================================
// serde::Deserializer
// ============================================================================

macro_rules! deserialize_integer {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: Visitor<'de>,
            {
                let value: $ty = self.parse_integer(stringify!($ty))?;
                visitor.$visit(value)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    forward_to_deserialize_any! {
        bytes
        byte_buf
        unit
        unit_struct
        map
        identifier
        ignored_any
    }

    /// Dispatch on the current token; this is what makes untyped targets and skipped fields work.
    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match *self.peek_kind() {
            TokenKind::String(_) | TokenKind::Color(_) => self.deserialize_str(visitor),
            TokenKind::Char(c) => {
                self.advance();
                visitor.visit_char(c)
            }
            TokenKind::Int(i) => {
                self.advance();
                match (i64::try_from(i), u64::try_from(i)) {
                    (Ok(signed), _) => visitor.visit_i64(signed),
                    (_, Ok(unsigned)) => visitor.visit_u64(unsigned),
                    _ => visitor.visit_i128(i),
                }
            }
            TokenKind::Float(f) => {
                self.advance();
                visitor.visit_f64(f)
            }
            TokenKind::LBracket => self.deserialize_seq(visitor),
            TokenKind::Ident(_) if self.at_struct_start() => {
                let (span, name) = self.struct_header(None)?;
                self.struct_body(span, Some(name.unwrap_or(Cow::Borrowed(""))), visitor)
            }
            TokenKind::Ident(_) => self.deserialize_bool(visitor),
            _ => Err(self.unexpected("a value")),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = match self.peek_kind() {
            k if k.is_ident("true") => true,
            k if k.is_ident("false") => false,
            _ => return Err(self.unexpected("true or false")),
        };
        self.advance();
        visitor.visit_bool(value)
    }

    deserialize_integer! {
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_i128 => visit_i128(i128),
        deserialize_u128 => visit_u128(u128),
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_f32(self.parse_float()? as f32)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_f64(self.parse_float()?)
    }

    /// Chars accept a char literal or a character code in `0..=255`.
    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = match *self.peek_kind() {
            TokenKind::Char(c) => c,
            TokenKind::Int(code) => match u8::try_from(code) {
                Ok(byte) => byte as char,
                Err(_) => {
                    return Err(Error::InvalidChar {
                        value: code,
                        span: self.span(),
                    });
                }
            },
            _ => return Err(self.unexpected("a char")),
        };
        self.advance();
        visitor.visit_char(value)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.peek_kind() {
            TokenKind::String(_) => match self.string_value() {
                Cow::Borrowed(s) => visitor.visit_borrowed_str(s),
                Cow::Owned(s) => visitor.visit_string(s),
            },
            TokenKind::Color(_) => {
                let raw = self.raw();
                self.advance();
                visitor.visit_borrowed_str(raw)
            }
            _ => Err(self.unexpected("a string")),
        }
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    /// Present values are always `Some`; absent fields rely on `#[serde(default)]`.
    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    /// `[a, b, c]` lists, or a run of consecutive structs of the same type.
    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.peek_kind() {
            TokenKind::LBracket => {
                self.advance();
                let value = visitor.visit_seq(ListAccess::new(self))?;
                if !matches!(self.peek_kind(), TokenKind::RBracket) {
                    return Err(self.unexpected("']'"));
                }
                self.advance();
                Ok(value)
            }
            TokenKind::Ident(_) | TokenKind::Eof => visitor.visit_seq(StructRunAccess::new(self)),
            _ => Err(self.unexpected("'[' or a struct")),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(self, _name: &'static str, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let has_name_field = fields.contains(&"name");
        if !has_name_field && self.config.require_name_field {
            return Err(Error::MissingName {
                type_name: name.to_string(),
                span: self.span(),
            });
        }

        let (span, instance_name) = self.struct_header(Some(name))?;
        let delivered = has_name_field.then(|| instance_name.unwrap_or(Cow::Borrowed("")));
        self.struct_body(span, delivered, visitor)
    }

    /// Unit variants are selected by a string value.
    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.peek_kind() {
            TokenKind::String(_) => {
                let variant = self.string_value().into_owned();
                visitor.visit_enum(StringDeserializer::<Error>::new(variant))
            }
            _ => Err(self.unexpected("a string naming an enum variant")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename = "thing")]
    struct Thing<'a> {
        name: &'a str,
        #[serde(default)]
        label: Option<&'a str>,
    }

    #[test]
    fn test_instance_name_is_borrowed() {
        let source = r#"thing "lamp" { }"#;
        let thing: Thing = from_str(source).unwrap();
        assert_eq!(thing.name, "lamp");
    }

    #[test]
    fn test_escaped_string_cannot_be_borrowed() {
        let err = from_str::<Thing>(r#"thing "lamp" { label = "a\tb" }"#).unwrap_err();
        assert!(err.to_string().contains("borrowed"), "got: {}", err);
    }

    #[test]
    fn test_concatenated_string_cannot_be_borrowed() {
        let err = from_str::<Thing>(r#"thing { label = "a" "b" }"#).unwrap_err();
        assert!(matches!(err, Error::Custom { span: Some(_), .. }), "got: {:?}", err);
    }

    #[test]
    fn test_lexer_errors_surface_as_syntax() {
        let err = Deserializer::new("thing { label = \"open").err().unwrap();
        assert!(matches!(err, Error::Syntax(ref errors) if errors.len() == 1));
    }

    #[test]
    fn test_end_reports_trailing_tokens() {
        let err = from_str::<Thing>(r#"thing { } 42"#).unwrap_err();
        match err {
            Error::TrailingTokens { found, span } => {
                assert_eq!(found, "integer 42");
                assert_eq!(span, Span::new(10, 12));
            }
            other => panic!("expected TrailingTokens, got {:?}", other),
        }

        let config = DeserializerConfig::new().with_allow_trailing_tokens(true);
        let thing: Thing = from_str_with_config(r#"thing { } 42"#, config).unwrap();
        assert_eq!(thing.name, "");
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let err = from_slice::<Thing>(&[0x74, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, Error::InvalidUtf8(_)));
    }

    #[test]
    fn test_from_reader_reads_owned_values() {
        #[derive(Deserialize)]
        #[serde(rename = "thing")]
        struct Owned {
            name: String,
        }
        let owned: Owned = from_reader(&b"thing \"cup\" { }"[..]).unwrap();
        assert_eq!(owned.name, "cup");
    }
}
