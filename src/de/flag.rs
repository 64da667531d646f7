//! Deserializer for bare flags.
//!
//! A flag member (`monster { undead }`) carries no value token; it reads as `true` wherever a bool fits.

use serde::de::{self, Visitor};
use serde::forward_to_deserialize_any;

use super::{Error, Result};

pub(crate) struct FlagDeserializer;

impl<'de> de::Deserializer<'de> for FlagDeserializer {
    type Error = Error;

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit_struct seq tuple tuple_struct map struct enum identifier ignored_any
    }

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_bool(true)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_flag_reads_as_true() {
        assert!(bool::deserialize(FlagDeserializer).unwrap());
        assert_eq!(Option::<bool>::deserialize(FlagDeserializer).unwrap(), Some(true));
        <()>::deserialize(FlagDeserializer).unwrap();
    }

    #[test]
    fn test_flag_rejects_non_bool_targets() {
        let err = i32::deserialize(FlagDeserializer).unwrap_err();
        assert!(err.to_string().contains("boolean `true`"), "got: {}", err);
    }
}
