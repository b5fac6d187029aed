//! Category normalization: a vocabulary category becomes a toolbox category
//! listing references to its blocks.

use std::collections::BTreeMap;

use bloc_types::{Category, Entry, DEFAULT_COLOR};
use serde::{Deserialize, Serialize};

use crate::schema::BlockSchema;

/// The `kind` discriminator of toolbox items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Block,
    Category,
    CategoryToolbox,
}

/// A toolbox reference to one block type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockReference {
    pub kind: ItemKind,
    #[serde(rename = "type")]
    pub block_type: String,
    /// Shadow blocks pre-attached to named connections when the block is
    /// dragged out of the toolbox.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, InputDefault>,
}

/// Toolbox default for one connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDefault {
    pub shadow: ShadowBlock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadowBlock {
    #[serde(rename = "type")]
    pub block_type: String,
}

impl BlockReference {
    pub fn new(block_type: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Block,
            block_type: block_type.into(),
            inputs: BTreeMap::new(),
        }
    }

    /// A reference carrying the shadow declared on each of the schema's
    /// connections.
    pub fn for_schema(schema: &BlockSchema) -> Self {
        schema.rows.iter().fold(Self::new(&schema.block_type), |reference, row| {
            match (row.connection_name(), row.shadow()) {
                (Some(name), Some(shadow)) => reference.with_shadow(name, &shadow.block_type),
                _ => reference,
            }
        })
    }

    /// Builder: pre-attach a `block_type` shadow to connection `input`.
    pub fn with_shadow(mut self, input: impl Into<String>, block_type: impl Into<String>) -> Self {
        self.inputs.insert(
            input.into(),
            InputDefault {
                shadow: ShadowBlock {
                    block_type: block_type.into(),
                },
            },
        );
        self
    }
}

/// One toolbox category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryManifest {
    pub kind: ItemKind,
    pub name: String,
    pub colour: String,
    pub contents: Vec<BlockReference>,
}

impl CategoryManifest {
    /// An empty category; a blank colour falls back to the default.
    pub fn new(name: impl Into<String>, colour: impl Into<String>) -> Self {
        let colour = colour.into();
        Self {
            kind: ItemKind::Category,
            name: name.into(),
            colour: if colour.trim().is_empty() {
                DEFAULT_COLOR.to_string()
            } else {
                colour
            },
            contents: Vec::new(),
        }
    }

    /// Builder: append a block reference.
    pub fn with_block(mut self, block_type: impl Into<String>) -> Self {
        self.contents.push(BlockReference::new(block_type));
        self
    }

    pub fn block_types(&self) -> impl Iterator<Item = &str> {
        self.contents.iter().map(|r| r.block_type.as_str())
    }
}

/// Normalize `category` into a toolbox category.
///
/// `reference` is called once per entry, in order, with the manifest built
/// so far. Entries for which it returns `None` are left out.
pub fn normalize<F>(category: &Category, mut reference: F) -> CategoryManifest
where
    F: FnMut(&CategoryManifest, &Entry) -> Option<BlockReference>,
{
    let mut manifest = CategoryManifest::new(&category.name, &category.color);
    for entry in &category.entries {
        if let Some(block) = reference(&manifest, entry) {
            manifest.contents.push(block);
        }
    }
    manifest
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloc_layout::{Row, Shadow};

    use crate::schema::Shape;

    fn every_entry(_: &CategoryManifest, entry: &Entry) -> Option<BlockReference> {
        Some(BlockReference::new(&entry.name))
    }

    #[test]
    fn test_normalize_preserves_order() {
        let category = Category::new("Logic")
            .with_color("#5b80a5")
            .with_entry(Entry::new("b"))
            .with_entry(Entry::new("a"));
        let manifest = normalize(&category, every_entry);
        assert_eq!(manifest.name, "Logic");
        assert_eq!(manifest.colour, "#5b80a5");
        assert_eq!(manifest.block_types().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_default_colour() {
        assert_eq!(normalize(&Category::new("Plain"), every_entry).colour, DEFAULT_COLOR);
        assert_eq!(CategoryManifest::new("Blank", "  ").colour, DEFAULT_COLOR);
    }

    #[test]
    fn test_manifest_json() {
        let manifest = CategoryManifest::new("Logic", "#5b80a5").with_block("and_gate");
        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "category",
                "name": "Logic",
                "colour": "#5b80a5",
                "contents": [{"kind": "block", "type": "and_gate"}]
            })
        );
    }

    #[test]
    fn test_normalize_skips_rejected_entries() {
        let category = Category::new("C")
            .with_entry(Entry::new("keep"))
            .with_entry(Entry::new("drop"))
            .with_entry(Entry::new("also"));
        let manifest = normalize(&category, |manifest, entry| {
            assert_eq!(manifest.name, "C");
            (entry.name != "drop").then(|| BlockReference::new(&entry.name))
        });
        assert_eq!(manifest.block_types().collect::<Vec<_>>(), vec!["keep", "also"]);
    }

    #[test]
    fn test_reference_carries_shadows() {
        let shadow = Shadow {
            block_type: "math_number".to_string(),
        };
        let schema = BlockSchema {
            block_type: "is_even".to_string(),
            rows: vec![Row::value("N", Some("Number"), Some(shadow)), Row::value("M", None, None)],
            shape: Shape::Expression { output: Some("Boolean") },
            inputs_inline: false,
            tooltip: String::new(),
            colour: DEFAULT_COLOR.to_string(),
            hooks: None,
        };
        let json = serde_json::to_value(BlockReference::for_schema(&schema)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "block",
                "type": "is_even",
                "inputs": {"N": {"shadow": {"type": "math_number"}}}
            })
        );
    }
}
