//! Layout error types.

use thiserror::Error;

use crate::connection::SUPPORTED_TAGS;

/// Errors that abort laying out one entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A connection names a type outside the closed tag set.
    #[error("unsupported connection type '{tag}' on connection '{connection}'")]
    UnsupportedType {
        tag: String,
        connection: String,
        /// Template index of the offending field; `None` for an output
        /// connection.
        field: Option<usize>,
    },

    /// A template element is neither text, widget nor connection.
    #[error("template field {field} is not a text, widget or connection field")]
    UnknownField { field: usize },
}

impl LayoutError {
    /// Template index the error points at, if any.
    pub fn field(&self) -> Option<usize> {
        match self {
            Self::UnsupportedType { field, .. } => *field,
            Self::UnknownField { field } => Some(*field),
        }
    }

    /// Attach the template index of the field being laid out.
    pub(crate) fn at_field(self, index: usize) -> Self {
        match self {
            Self::UnsupportedType {
                tag, connection, ..
            } => Self::UnsupportedType {
                tag,
                connection,
                field: Some(index),
            },
            other => other,
        }
    }

    /// A fix hint for hosts to show next to the message.
    pub fn suggestion(&self) -> String {
        match self {
            Self::UnsupportedType { .. } => format!("use one of: {}", SUPPORTED_TAGS.join(", ")),
            Self::UnknownField { .. } => {
                "expected {\"text\"}, {\"name\", \"field\"} or {\"blocklyInput\"}".to_string()
            }
        }
    }
}

/// Layout result type alias.
pub type LayoutResult<T> = Result<T, LayoutError>;
