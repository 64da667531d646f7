//! libtcod value types: `Color` and `Dice`.
//!
//! Both parse from their libtcod text notation and implement serde so they can appear as fields of deserialized
//! structs.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when a color or dice string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} '{value}': {reason}")]
pub struct ValueParseError {
    pub kind: &'static str,
    pub value: String,
    pub reason: &'static str,
}

impl ValueParseError {
    fn new(kind: &'static str, value: &str, reason: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            reason,
        }
    }
}

// ============================================================================
// Color
// ============================================================================

/// An RGB color, written `#RRGGBB` or `"R,G,B"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse the six hex digits of `#RRGGBB` (without the `#`).
    pub fn from_hex(digits: &str) -> Result<Self, ValueParseError> {
        let err = |reason| ValueParseError::new("color", digits, reason);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err("expected exactly six hex digits"));
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| err("invalid hex digit"));
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl FromStr for Color {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return Color::from_hex(hex).map_err(|_| ValueParseError::new("color", s, "expected #RRGGBB"));
        }

        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ValueParseError::new("color", s, "expected #RRGGBB or R,G,B"));
        }
        let mut channels = [0u8; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| ValueParseError::new("color", s, "channels must be integers in 0..=255"))?;
        }
        Ok(Self::new(channels[0], channels[1], channels[2]))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct ColorVisitor;

impl<'de> Visitor<'de> for ColorVisitor {
    type Value = Color;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a color as #RRGGBB, \"R,G,B\" or [R, G, B]")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Color, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Color, A::Error> {
        let r = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let g = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(1, &self))?;
        let b = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(2, &self))?;
        if seq.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(4, &self));
        }
        Ok(Color::new(r, g, b))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ColorVisitor)
    }
}

// ============================================================================
// Dice
// ============================================================================

/// A dice expression in libtcod notation: `[<m>(x|*)]<n>(d|D)<f>[(+|-)<a>]`.
///
/// Rolling yields `multiplier * (sum of nb_rolls dice with nb_faces faces) + addsub`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dice {
    pub multiplier: f32,
    pub nb_rolls: u32,
    pub nb_faces: u32,
    pub addsub: f32,
}

impl Dice {
    pub fn new(nb_rolls: u32, nb_faces: u32) -> Self {
        Self {
            multiplier: 1.0,
            nb_rolls,
            nb_faces,
            addsub: 0.0,
        }
    }

    /// Smallest possible roll.
    pub fn min(&self) -> f32 {
        self.bound(self.nb_rolls as f32)
    }

    /// Largest possible roll.
    pub fn max(&self) -> f32 {
        self.bound(self.nb_rolls as f32 * self.nb_faces as f32)
    }

    fn bound(&self, sum: f32) -> f32 {
        self.multiplier * sum + self.addsub
    }
}

impl FromStr for Dice {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| ValueParseError::new("dice", s, reason);
        let text = s.trim();

        let (multiplier, rest) = match text.find(['x', '*']) {
            Some(i) => {
                let m = text[..i].trim().parse::<f32>().map_err(|_| err("invalid multiplier"))?;
                (m, &text[i + 1..])
            }
            None => (1.0, text),
        };

        let d = rest.find(['d', 'D']).ok_or_else(|| err("missing 'd'"))?;
        let rolls = rest[..d].trim();
        let nb_rolls = if rolls.is_empty() {
            1
        } else {
            rolls.parse::<u32>().map_err(|_| err("invalid number of rolls"))?
        };

        let after = &rest[d + 1..];
        let (faces, addsub) = match after.find(['+', '-']) {
            Some(i) => {
                let a = after[i + 1..].trim().parse::<f32>().map_err(|_| err("invalid modifier"))?;
                let a = if after.as_bytes()[i] == b'-' { -a } else { a };
                (&after[..i], a)
            }
            None => (after, 0.0),
        };
        let nb_faces = faces.trim().parse::<u32>().map_err(|_| err("invalid number of faces"))?;
        if nb_faces == 0 {
            return Err(err("a die needs at least one face"));
        }

        Ok(Self {
            multiplier,
            nb_rolls,
            nb_faces,
            addsub,
        })
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.multiplier != 1.0 {
            write!(f, "{}x", self.multiplier)?;
        }
        write!(f, "{}d{}", self.nb_rolls, self.nb_faces)?;
        if self.addsub > 0.0 {
            write!(f, "+{}", self.addsub)?;
        } else if self.addsub < 0.0 {
            write!(f, "-{}", -self.addsub)?;
        }
        Ok(())
    }
}

impl Serialize for Dice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct DiceVisitor;

impl<'de> Visitor<'de> for DiceVisitor {
    type Value = Dice;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a dice expression such as \"3x2d6+1\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Dice, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Dice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(DiceVisitor)
    }
}
