use crate::Origin;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of errors stored before further errors are only counted.
pub const MAX_ERRORS: usize = 20;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Diagnostic category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Input,
    Type,
    Layout,
    Naming,
}

/// Numeric diagnostic code (E001–E399).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Input errors (E001–E099) ──
    pub const INVALID_VOCABULARY: Self = Self(1);

    // ── Type errors (E100–E199) ──
    pub const UNSUPPORTED_TYPE: Self = Self(100);

    // ── Layout errors (E200–E299) ──
    pub const UNKNOWN_FIELD: Self = Self(200);

    // ── Naming errors (E300–E399) ──
    pub const DUPLICATE_ENTRY: Self = Self(300);
    pub const DUPLICATE_CONNECTION: Self = Self(301);

    /// Get the category for this code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            0..=99 => ErrorCategory::Input,
            100..=199 => ErrorCategory::Type,
            200..=299 => ErrorCategory::Layout,
            _ => ErrorCategory::Naming,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:03}", self.0)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Type => write!(f, "type"),
            Self::Layout => write!(f, "layout"),
            Self::Naming => write!(f, "naming"),
        }
    }
}

/// A structured compiler diagnostic, located at the entry (and field) that
/// produced it.
///
/// Hosts render these directly; they must not parse the message text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlocError {
    pub code: ErrorCode,
    pub severity: Severity,
    pub category: ErrorCategory,
    pub message: String,
    pub origin: Origin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl BlocError {
    /// Create an error-severity diagnostic.
    pub fn new(code: ErrorCode, message: impl Into<String>, origin: Origin) -> Self {
        Self {
            code,
            severity: Severity::Error,
            category: code.category(),
            message: message.into(),
            origin,
            suggestion: None,
        }
    }

    /// Create a warning-severity diagnostic.
    pub fn warning(code: ErrorCode, message: impl Into<String>, origin: Origin) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::new(code, message, origin)
        }
    }

    /// Attach a fix suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for BlocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(
            f,
            "{level}[{}] {}: {} ({})",
            self.code, self.origin, self.message, self.category
        )?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, "; {suggestion}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BlocError {}

/// Errors and warnings collected over one compile call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub errors: Vec<BlocError>,
    pub warnings: Vec<BlocError>,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl Diagnostics {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.total_warnings > 0
    }

    /// Add a diagnostic, routed by its severity. Errors past
    /// [`MAX_ERRORS`] are counted but not stored.
    pub fn push(&mut self, diagnostic: BlocError) {
        match diagnostic.severity {
            Severity::Error => {
                if self.errors.len() < MAX_ERRORS {
                    self.errors.push(diagnostic);
                }
                self.total_errors += 1;
            }
            Severity::Warning => {
                self.warnings.push(diagnostic);
                self.total_warnings += 1;
            }
        }
    }

    /// Stored errors and warnings for one entry.
    pub fn for_entry<'a>(&'a self, entry: &'a str) -> impl Iterator<Item = &'a BlocError> + 'a {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .filter(move |d| d.origin.entry == entry)
    }

    /// True if any stored error or warning carries `code`.
    pub fn contains(&self, code: ErrorCode) -> bool {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .any(|d| d.code == code)
    }
}
