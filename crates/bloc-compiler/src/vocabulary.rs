//! Vocabulary descriptors.
//!
//! By default a compile produces no vocabulary. When enabled, each compiled
//! block gets a descriptor derived from its schema: parameters from its
//! connections and widgets, return type from its output. Descriptors render
//! to JSON and to a compact text reference.

use std::collections::HashSet;

use bloc_layout::{ConnectionType, Fragment, RowInput};
use serde::Serialize;

use crate::registry::BlockRegistry;
use crate::schema::{BlockSchema, Shape};
use crate::toolbox::ToolboxManifest;

/// One block parameter: a connection or a widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// Descriptor for one block type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularyEntry {
    pub name: String,
    pub category: String,
    pub description: String,
    pub params: Vec<Param>,
    /// Output type tag; `None` for statement blocks.
    pub returns: Option<String>,
}

/// Descriptors in toolbox order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Vocabulary {
    pub entries: Vec<VocabularyEntry>,
}

impl Vocabulary {
    pub fn get(&self, name: &str) -> Option<&VocabularyEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compact text reference, grouped by category:
    ///
    /// ```text
    /// Logic:
    ///   and_gate(A: boolean, B: boolean) -> boolean  Logical AND
    /// ```
    pub fn to_reference(&self) -> String {
        let mut out = String::with_capacity(64 * self.entries.len());
        let mut current: Option<&str> = None;

        for entry in &self.entries {
            if current != Some(entry.category.as_str()) {
                if current.is_some() {
                    out.push('\n');
                }
                out.push_str(&entry.category);
                out.push_str(":\n");
                current = Some(entry.category.as_str());
            }
            out.push_str("  ");
            out.push_str(&format_signature(entry));
            if !entry.description.is_empty() {
                out.push_str("  ");
                out.push_str(&entry.description);
            }
            out.push('\n');
        }
        out
    }
}

/// Format `name(param: type, ...)`, plus ` -> type` for expression blocks.
fn format_signature(entry: &VocabularyEntry) -> String {
    let params: Vec<String> = entry
        .params
        .iter()
        .map(|p| format!("{}: {}", p.name, p.ty))
        .collect();
    match &entry.returns {
        Some(ret) => format!("{}({}) -> {}", entry.name, params.join(", "), ret),
        None => format!("{}({})", entry.name, params.join(", ")),
    }
}

/// Build descriptors for every compiled block the toolbox references.
///
/// Returns `None` unless `enabled`. References without a registered schema
/// (the built-in categories) are skipped, as are repeats of a name.
pub fn build(toolbox: &ToolboxManifest, blocks: &BlockRegistry, enabled: bool) -> Option<Vocabulary> {
    if !enabled {
        return None;
    }

    let mut vocab = Vocabulary::default();
    let mut described = HashSet::new();
    for category in &toolbox.contents {
        for block_type in category.block_types() {
            if !described.insert(block_type) {
                continue;
            }
            if let Some(schema) = blocks.get(block_type) {
                vocab.entries.push(describe(schema, &category.name));
            }
        }
    }
    Some(vocab)
}

fn describe(schema: &BlockSchema, category: &str) -> VocabularyEntry {
    let mut params = Vec::new();
    for row in &schema.rows {
        for fragment in &row.fragments {
            if let Fragment::Widget { name, widget } = fragment {
                params.push(Param {
                    name: name.clone(),
                    ty: widget.kind.clone(),
                });
            }
        }
        match &row.input {
            RowInput::Dummy => {}
            RowInput::Value { name, check, .. } => params.push(Param {
                name: name.clone(),
                ty: check_tag(*check).to_string(),
            }),
            RowInput::Statement { name, .. } => params.push(Param {
                name: name.clone(),
                ty: ConnectionType::Void.tag().to_string(),
            }),
        }
    }

    let returns = match schema.shape {
        Shape::Statement => None,
        Shape::Expression { output } => Some(check_tag(output).to_string()),
    };

    VocabularyEntry {
        name: schema.block_type.clone(),
        category: category.to_string(),
        description: schema.tooltip.clone(),
        params,
        returns,
    }
}

fn check_tag(check: Option<&str>) -> &'static str {
    ConnectionType::from_check(check)
        .unwrap_or(ConnectionType::Any)
        .tag()
}
