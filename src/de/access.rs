//! `MapAccess` and `SeqAccess` implementations driving the deserializer.

use std::borrow::Cow;

use serde::de::value::{BorrowedStrDeserializer, StringDeserializer};
use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess};
use tcod_config_syntax::Span;
use tcod_config_syntax::lexer::TokenKind;

use super::flag::FlagDeserializer;
use super::{Deserializer, Error, Result};

// ============================================================================
// Struct bodies
// ============================================================================

/// What the last key returned by [`StructAccess`] is waiting for.
enum Pending<'de> {
    Nothing,
    /// The synthetic `name` key; holds the instance name.
    Name(Cow<'de, str>),
    /// `key =` was consumed and the value follows.
    Assigned,
    /// A bare identifier was consumed.
    Flag(Span),
    /// The cursor is on a nested struct's type identifier.
    Struct,
}

/// Walks the members of a struct body, up to but not including the closing `}`.
pub(crate) struct StructAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    instance_name: Option<Cow<'de, str>>,
    pending: Pending<'de>,
}

impl<'a, 'de> StructAccess<'a, 'de> {
    pub(crate) fn new(de: &'a mut Deserializer<'de>, instance_name: Option<Cow<'de, str>>) -> Self {
        Self {
            de,
            instance_name,
            pending: Pending::Nothing,
        }
    }

    /// Classify the member starting at the current identifier and consume what precedes its value.
    fn begin_member(&mut self, key: &'de str) -> Result<Pending<'de>> {
        let next = self.de.peek_next_kind();
        if matches!(next, TokenKind::Assign) {
            self.de.advance();
            self.de.advance();
            Ok(Pending::Assigned)
        } else if next.opens_struct_after_ident() {
            Ok(Pending::Struct)
        } else if next.ends_flag_after_ident() {
            let span = self.de.span();
            self.de.advance();
            Ok(Pending::Flag(span))
        } else {
            self.de.advance();
            Err(self.de.unexpected(format!("'=', a struct body or another member after '{}'", key)))
        }
    }
}

impl<'de> MapAccess<'de> for StructAccess<'_, 'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        if let Some(name) = self.instance_name.take() {
            self.pending = Pending::Name(name);
            return seed.deserialize(BorrowedStrDeserializer::<Error>::new("name")).map(Some);
        }

        match self.de.peek_kind() {
            TokenKind::RBrace => return Ok(None),
            TokenKind::Ident(_) => {}
            TokenKind::TypeKeyword(keyword) => {
                return Err(Error::UnexpectedToken {
                    found: format!("'{}'", keyword.keyword()),
                    expected: "a field, flag or struct (dynamic declarations are not supported)".to_string(),
                    span: self.de.span(),
                });
            }
            _ => return Err(self.de.unexpected("a field, flag, struct or '}'")),
        }

        let key_span = self.de.span();
        let key = self.de.raw();
        self.pending = self.begin_member(key)?;
        seed.deserialize(BorrowedStrDeserializer::<Error>::new(key))
            .map(Some)
            .map_err(|e| e.or_span(key_span))
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        match std::mem::replace(&mut self.pending, Pending::Nothing) {
            Pending::Name(Cow::Borrowed(name)) => seed.deserialize(BorrowedStrDeserializer::<Error>::new(name)),
            Pending::Name(Cow::Owned(name)) => seed.deserialize(StringDeserializer::<Error>::new(name)),
            Pending::Assigned => {
                let span = self.de.span();
                if !self.de.peek_kind().starts_value() {
                    return Err(self.de.unexpected("a value"));
                }
                seed.deserialize(&mut *self.de).map_err(|e| e.or_span(span))
            }
            Pending::Flag(span) => seed.deserialize(FlagDeserializer).map_err(|e| e.or_span(span)),
            Pending::Struct => {
                let span = self.de.span();
                seed.deserialize(&mut *self.de).map_err(|e| e.or_span(span))
            }
            Pending::Nothing => Err(de::Error::custom("struct value requested before its key")),
        }
    }
}

// ============================================================================
// Sequences
// ============================================================================

/// Elements of a bracketed `[a, b, c]` list. The brackets are consumed by the caller.
pub(crate) struct ListAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    first: bool,
}

impl<'a, 'de> ListAccess<'a, 'de> {
    pub(crate) fn new(de: &'a mut Deserializer<'de>) -> Self {
        Self { de, first: true }
    }
}

impl<'de> SeqAccess<'de> for ListAccess<'_, 'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        if matches!(self.de.peek_kind(), TokenKind::RBracket) {
            return Ok(None);
        }
        if !self.first {
            if !matches!(self.de.peek_kind(), TokenKind::Comma) {
                return Err(self.de.unexpected("',' or ']'"));
            }
            self.de.advance();
            // Trailing comma
            if matches!(self.de.peek_kind(), TokenKind::RBracket) {
                return Ok(None);
            }
        }
        self.first = false;

        let span = self.de.span();
        seed.deserialize(&mut *self.de)
            .map(Some)
            .map_err(|e| e.or_span(span))
    }
}

/// A run of consecutive struct instances sharing one type name.
///
/// The run ends at the first member that is not an instance of that type, leaving it for the caller.
pub(crate) struct StructRunAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    type_name: Option<&'de str>,
}

impl<'a, 'de> StructRunAccess<'a, 'de> {
    pub(crate) fn new(de: &'a mut Deserializer<'de>) -> Self {
        let type_name = de.at_struct_start().then(|| de.raw());
        Self { de, type_name }
    }
}

impl<'de> SeqAccess<'de> for StructRunAccess<'_, 'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        let Some(type_name) = self.type_name else {
            return Ok(None);
        };
        if !self.de.at_struct_start() || self.de.raw() != type_name {
            return Ok(None);
        }
        seed.deserialize(&mut *self.de).map(Some)
    }
}
