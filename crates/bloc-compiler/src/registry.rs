//! Host-side registries the compiler writes into.
//!
//! Both are keyed by block type name. Registering a name twice replaces the
//! earlier value and hands it back to the caller.

use std::collections::HashMap;

use bloc_types::{BlockView, Generator};
use serde_json::Value;

use crate::schema::BlockSchema;

// ══════════════════════════════════════════════════════════════════════════════
// BlockRegistry
// ══════════════════════════════════════════════════════════════════════════════

/// Block type name → block schema.
#[derive(Debug, Default)]
pub struct BlockRegistry {
    blocks: HashMap<String, BlockSchema>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `schema` under its block type, returning any schema it replaces.
    pub fn register(&mut self, schema: BlockSchema) -> Option<BlockSchema> {
        self.blocks.insert(schema.block_type.clone(), schema)
    }

    pub fn get(&self, block_type: &str) -> Option<&BlockSchema> {
        self.blocks.get(block_type)
    }

    pub fn contains(&self, block_type: &str) -> bool {
        self.blocks.contains_key(block_type)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Registered block types, sorted.
    pub fn block_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.blocks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// All schemas in Blockly JSON form, sorted by block type.
    pub fn to_json(&self) -> Value {
        Value::Array(
            self.block_types()
                .into_iter()
                .filter_map(|name| self.blocks.get(name))
                .map(BlockSchema::to_blockly_json)
                .collect(),
        )
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// GeneratorTable
// ══════════════════════════════════════════════════════════════════════════════

/// Block type name → code generator.
#[derive(Debug, Default)]
pub struct GeneratorTable {
    generators: HashMap<String, Generator>,
}

impl GeneratorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `generator` to `block_type`, returning any generator it replaces.
    pub fn register(&mut self, block_type: impl Into<String>, generator: Generator) -> Option<Generator> {
        self.generators.insert(block_type.into(), generator)
    }

    pub fn get(&self, block_type: &str) -> Option<&Generator> {
        self.generators.get(block_type)
    }

    pub fn contains(&self, block_type: &str) -> bool {
        self.generators.contains_key(block_type)
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Run the generator registered for `block`'s type.
    ///
    /// Returns `None` if no generator is registered for that type.
    pub fn generate(&self, block: &dyn BlockView) -> Option<String> {
        self.generators
            .get(block.block_type())
            .map(|generator| generator.generate(block))
    }
}
