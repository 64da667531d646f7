//! Deserialization errors.
//!
//! Every variant that originates from a token carries its [`Span`], and the error type implements
//! [`miette::Diagnostic`] so the CLI can point at the offending source text.

use std::fmt::Display;

use tcod_config_syntax::{Span, SyntaxError};

/// Result alias used throughout the deserializer.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error produced while deserializing a config file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source could not be tokenized.
    #[error("{}", syntax_summary(.0))]
    Syntax(Vec<SyntaxError>),

    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        found: String,
        expected: String,
        span: Span,
    },

    #[error("found struct '{found}', expected struct '{expected}'")]
    UnexpectedStruct {
        found: String,
        expected: String,
        span: Span,
    },

    #[error("struct '{type_name}' has no 'name' field to receive the instance name")]
    MissingName { type_name: String, span: Span },

    #[error("{value} does not fit in {target}")]
    NumberOutOfRange {
        value: i128,
        target: &'static str,
        span: Span,
    },

    #[error("{value} is not a valid char code, expected 0..=255")]
    InvalidChar { value: i128, span: Span },

    #[error("unexpected {found} after the end of the document")]
    TrailingTokens { found: String, span: Span },

    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// An error raised by a `Deserialize` implementation, such as a missing field.
    #[error("{message}")]
    Custom { message: String, span: Option<Span> },
}

fn syntax_summary(errors: &[SyntaxError]) -> String {
    match errors {
        [] => "syntax error".to_string(),
        [only] => only.message.clone(),
        [first, rest @ ..] => format!("{} (and {} more syntax errors)", first.message, rest.len()),
    }
}

impl Error {
    /// Source location of the error, when it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Syntax(errors) => errors.first().map(|e| e.span),
            Error::UnexpectedToken { span, .. }
            | Error::UnexpectedStruct { span, .. }
            | Error::MissingName { span, .. }
            | Error::NumberOutOfRange { span, .. }
            | Error::InvalidChar { span, .. }
            | Error::TrailingTokens { span, .. } => Some(*span),
            Error::Custom { span, .. } => *span,
            Error::InvalidUtf8(_) | Error::Io(_) => None,
        }
    }

    /// Attach `span` to a custom error that does not have a location yet.
    pub(crate) fn or_span(self, fallback: Span) -> Self {
        match self {
            Error::Custom { message, span: None } => Error::Custom {
                message,
                span: Some(fallback),
            },
            other => other,
        }
    }
}

impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Custom {
            message: msg.to_string(),
            span: None,
        }
    }
}

impl From<Vec<SyntaxError>> for Error {
    fn from(errors: Vec<SyntaxError>) -> Self {
        Error::Syntax(errors)
    }
}

impl miette::Diagnostic for Error {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        let code = match self {
            Error::Syntax(_) => "tcod_config::syntax",
            Error::UnexpectedToken { .. } => "tcod_config::unexpected_token",
            Error::UnexpectedStruct { .. } => "tcod_config::unexpected_struct",
            Error::MissingName { .. } => "tcod_config::missing_name",
            Error::NumberOutOfRange { .. } => "tcod_config::number_out_of_range",
            Error::InvalidChar { .. } => "tcod_config::invalid_char",
            Error::TrailingTokens { .. } => "tcod_config::trailing_tokens",
            Error::InvalidUtf8(_) => "tcod_config::invalid_utf8",
            Error::Io(_) => "tcod_config::io",
            Error::Custom { .. } => "tcod_config::custom",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        let help: Box<dyn Display + 'a> = match self {
            Error::UnexpectedStruct { expected, .. } => Box::new(format!(
                "the field must be named after the struct type; use #[serde(rename = \"...\")] to match '{}'",
                expected
            )),
            Error::MissingName { .. } => {
                Box::new("add a `name: String` field, or disable `require_name_field` in DeserializerConfig")
            }
            Error::TrailingTokens { .. } => {
                Box::new("a document holds a single struct or one run of structs of the same type")
            }
            _ => return None,
        };
        Some(help)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        if let Error::Syntax(_) = self {
            return None;
        }
        let span = self.span()?;
        Some(Box::new(std::iter::once(miette::LabeledSpan::new_with_span(
            Some(label_for(self).to_string()),
            span,
        ))))
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn miette::Diagnostic> + 'a>> {
        match self {
            Error::Syntax(errors) => Some(Box::new(errors.iter().map(|e| e as &dyn miette::Diagnostic))),
            _ => None,
        }
    }
}

fn label_for(error: &Error) -> &'static str {
    match error {
        Error::UnexpectedStruct { .. } => "this struct",
        Error::MissingName { .. } => "instance name has nowhere to go",
        Error::NumberOutOfRange { .. } | Error::InvalidChar { .. } => "this value",
        Error::TrailingTokens { .. } => "extra input starts here",
        _ => "here",
    }
}
