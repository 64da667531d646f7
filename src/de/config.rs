//! Deserializer configuration.

use std::fmt;

/// Options controlling how strictly the deserializer maps a file onto Rust types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeserializerConfig {
    /// Reject structs whose Rust type has no `name` field to receive the instance name.
    pub require_name_field: bool,
    /// Ignore anything after the root value instead of reporting `TrailingTokens`.
    pub allow_trailing_tokens: bool,
}

impl Default for DeserializerConfig {
    fn default() -> Self {
        Self {
            require_name_field: true,
            allow_trailing_tokens: false,
        }
    }
}

impl DeserializerConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether struct types must have a `name` field
    pub fn with_require_name_field(mut self, require: bool) -> Self {
        self.require_name_field = require;
        self
    }

    /// Set whether input after the root value is ignored
    pub fn with_allow_trailing_tokens(mut self, allow: bool) -> Self {
        self.allow_trailing_tokens = allow;
        self
    }
}

impl fmt::Display for DeserializerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "require_name_field={}, allow_trailing_tokens={}",
            self.require_name_field, self.allow_trailing_tokens
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_strict() {
        let config = DeserializerConfig::default();
        assert!(config.require_name_field);
        assert!(!config.allow_trailing_tokens);
        assert_eq!(config, DeserializerConfig::new());
    }

    #[test]
    fn test_builders() {
        let config = DeserializerConfig::new()
            .with_require_name_field(false)
            .with_allow_trailing_tokens(true);
        assert!(!config.require_name_field);
        assert!(config.allow_trailing_tokens);
        assert_eq!(config.to_string(), "require_name_field=false, allow_trailing_tokens=true");
    }
}
