//! The category toolbox manifest.

use serde::{Deserialize, Serialize};

use crate::category::{CategoryManifest, ItemKind};

/// A `categoryToolbox` listing every category in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolboxManifest {
    pub kind: ItemKind,
    pub contents: Vec<CategoryManifest>,
}

impl ToolboxManifest {
    pub fn new(contents: Vec<CategoryManifest>) -> Self {
        Self {
            kind: ItemKind::CategoryToolbox,
            contents,
        }
    }

    pub fn category(&self, name: &str) -> Option<&CategoryManifest> {
        self.contents.iter().find(|c| c.name == name)
    }

    /// Every referenced block type, in toolbox order.
    pub fn block_types(&self) -> impl Iterator<Item = &str> {
        self.contents.iter().flat_map(CategoryManifest::block_types)
    }
}

/// The toolbox: user categories first, then `defaults`.
pub fn assemble(categories: Vec<CategoryManifest>, defaults: Vec<CategoryManifest>) -> ToolboxManifest {
    let mut contents = categories;
    contents.extend(defaults);
    ToolboxManifest::new(contents)
}

// ── Built-in categories ──

const FLOW_COLOUR: &str = "#5ba55b";
const MATH_COLOUR: &str = "#5b67a5";

const FLOW_BLOCKS: &[&str] = &[
    "controls_if",
    "controls_repeat_ext",
    "controls_whileUntil",
    "controls_for",
    "controls_flow_statements",
];

const MATH_BLOCKS: &[&str] = &[
    "math_number",
    "math_arithmetic",
    "math_single",
    "math_round",
    "math_modulo",
];

/// The built-in "Flow" and "Math" categories, referencing blocks the host
/// environment ships with.
pub fn default_categories() -> Vec<CategoryManifest> {
    let build = |name: &str, colour: &str, blocks: &[&str]| {
        blocks
            .iter()
            .fold(CategoryManifest::new(name, colour), |m, b| m.with_block(*b))
    };
    vec![
        build("Flow", FLOW_COLOUR, FLOW_BLOCKS),
        build("Math", MATH_COLOUR, MATH_BLOCKS),
    ]
}
