//! Compiler configuration.

use bloc_layout::{LayoutConfig, UnknownFieldPolicy, DEFAULT_HELP_ICON};
use serde::{Deserialize, Serialize};

/// What to do when two entries (or two connections of one entry) share a
/// name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Last declaration wins; a warning is recorded.
    #[default]
    Warn,
    /// The later declaration fails to compile.
    Strict,
}

/// Options for one compile call.
///
/// Every field has a default, so a partial TOML or JSON document is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    pub unknown_fields: UnknownFieldPolicy,
    pub duplicates: DuplicatePolicy,
    /// Append the built-in "Flow" and "Math" categories to the toolbox.
    pub default_categories: bool,
    /// Build vocabulary descriptors instead of an empty vocabulary.
    pub vocabulary: bool,
    /// Asset reference for the help affordance on every block.
    pub help_icon: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::FailFast,
            duplicates: DuplicatePolicy::Warn,
            default_categories: false,
            vocabulary: false,
            help_icon: DEFAULT_HELP_ICON.to_string(),
        }
    }
}

impl CompileOptions {
    /// Defaults, but duplicate names are errors.
    pub fn strict() -> Self {
        Self {
            duplicates: DuplicatePolicy::Strict,
            ..Self::default()
        }
    }

    /// Defaults, but unknown template fields are skipped with a warning.
    pub fn permissive() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::Permissive,
            ..Self::default()
        }
    }

    pub(crate) fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            help_icon: self.help_icon.clone(),
            unknown_fields: self.unknown_fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let opts: CompileOptions = serde_json::from_str(r#"{"duplicates": "strict"}"#).unwrap();
        assert_eq!(opts.duplicates, DuplicatePolicy::Strict);
        assert_eq!(opts.unknown_fields, UnknownFieldPolicy::FailFast);
        assert_eq!(opts.help_icon, DEFAULT_HELP_ICON);
        assert!(!opts.vocabulary);
    }

    #[test]
    fn test_policy_spelling() {
        let opts: CompileOptions =
            serde_json::from_str(r#"{"unknown_fields": "permissive", "default_categories": true}"#)
                .unwrap();
        assert_eq!(opts, CompileOptions {
            default_categories: true,
            ..CompileOptions::permissive()
        });
    }
}
