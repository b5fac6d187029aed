use serde::{Deserialize, Serialize};
use std::fmt;

/// Where in a vocabulary a diagnostic comes from.
///
/// `field` is the 0-based index into the entry's template, when the problem
/// is tied to one field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Origin {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub entry: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<usize>,
}

impl Origin {
    /// Origin of a whole entry.
    pub fn entry(category: impl Into<String>, entry: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            entry: entry.into(),
            field: None,
        }
    }

    /// Origin with no category or entry, for document-level problems.
    pub fn document() -> Self {
        Self::default()
    }

    /// Narrow to a single template field.
    pub fn with_field(mut self, index: usize) -> Self {
        self.field = Some(index);
        self
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.category.is_empty() && self.entry.is_empty() {
            return write!(f, "<vocabulary>");
        }
        write!(f, "{}/{}", self.category, self.entry)?;
        if let Some(index) = self.field {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}
