//! Connection type resolution.
//!
//! Maps the closed set of abstract type tags onto the connection checks the
//! editor understands. `any` (or no tag) is an untyped value slot; `void`
//! is a statement slot, not a value slot.

use std::fmt;

use bloc_types::TypedConnection;

use crate::error::{LayoutError, LayoutResult};

/// Every tag accepted on a connection, in documentation order.
pub const SUPPORTED_TAGS: &[&str] = &["any", "void", "boolean", "number", "string", "array", "color"];

/// An abstract connection type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionType {
    Any,
    Void,
    Boolean,
    Number,
    String,
    Array,
    Color,
}

impl ConnectionType {
    /// Parse a tag. `None` means untyped and resolves to [`ConnectionType::Any`].
    pub fn from_tag(tag: Option<&str>) -> Option<Self> {
        let ty = match tag {
            None | Some("any") => Self::Any,
            Some("void") => Self::Void,
            Some("boolean") => Self::Boolean,
            Some("number") => Self::Number,
            Some("string") => Self::String,
            Some("array") => Self::Array,
            Some("color") => Self::Color,
            Some(_) => return None,
        };
        Some(ty)
    }

    /// Resolve the type of a declared connection.
    pub fn resolve(connection: &TypedConnection) -> LayoutResult<Self> {
        let tag = connection.type_tag.as_deref();
        Self::from_tag(tag).ok_or_else(|| LayoutError::UnsupportedType {
            tag: tag.unwrap_or_default().to_string(),
            connection: connection.name.clone(),
            field: None,
        })
    }

    /// The editor's check token, or `None` for slots that accept anything.
    pub fn check(self) -> Option<&'static str> {
        match self {
            Self::Any | Self::Void => None,
            Self::Boolean => Some("Boolean"),
            Self::Number => Some("Number"),
            Self::String => Some("String"),
            Self::Array => Some("Array"),
            Self::Color => Some("Colour"),
        }
    }

    /// Inverse of [`check`](Self::check) for value slots.
    pub fn from_check(check: Option<&str>) -> Option<Self> {
        let ty = match check {
            None => Self::Any,
            Some("Boolean") => Self::Boolean,
            Some("Number") => Self::Number,
            Some("String") => Self::String,
            Some("Array") => Self::Array,
            Some("Colour") => Self::Color,
            Some(_) => return None,
        };
        Some(ty)
    }

    /// True for `void`: the slot takes a sequence of statement blocks.
    pub fn is_statement(self) -> bool {
        self == Self::Void
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Void => "void",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Color => "color",
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_supported_tag_round_trips() {
        for tag in SUPPORTED_TAGS {
            let ty = ConnectionType::from_tag(Some(*tag)).unwrap();
            assert_eq!(ty.tag(), *tag);
        }
    }

    #[test]
    fn test_null_and_any_are_untyped() {
        assert_eq!(ConnectionType::from_tag(None), Some(ConnectionType::Any));
        assert_eq!(ConnectionType::Any.check(), None);
        assert!(!ConnectionType::Any.is_statement());
    }

    #[test]
    fn test_void_is_statement() {
        let ty = ConnectionType::from_tag(Some("void")).unwrap();
        assert!(ty.is_statement());
        assert_eq!(ty.check(), None);
    }

    #[test]
    fn test_checks() {
        assert_eq!(ConnectionType::Boolean.check(), Some("Boolean"));
        assert_eq!(ConnectionType::Number.check(), Some("Number"));
        assert_eq!(ConnectionType::String.check(), Some("String"));
        assert_eq!(ConnectionType::Array.check(), Some("Array"));
        assert_eq!(ConnectionType::Color.check(), Some("Colour"));
    }

    #[test]
    fn test_from_check_inverts_check() {
        for tag in SUPPORTED_TAGS.iter().filter(|t| **t != "void") {
            let ty = ConnectionType::from_tag(Some(*tag)).unwrap();
            assert_eq!(ConnectionType::from_check(ty.check()), Some(ty));
        }
        assert_eq!(ConnectionType::from_check(Some("Date")), None);
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let err = ConnectionType::resolve(&TypedConnection::new("date", "WHEN")).unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnsupportedType {
                tag: "date".to_string(),
                connection: "WHEN".to_string(),
                field: None,
            }
        );
        assert!(err.suggestion().contains("boolean"));
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert_eq!(ConnectionType::from_tag(Some("Boolean")), None);
    }
}
