//! Block schema assembly.
//!
//! Wraps a laid-out template with the entry's connection shape, display
//! metadata and lifecycle hooks.

use std::fmt;
use std::sync::Arc;

use bloc_layout::{ConnectionType, Layout, LayoutError, Row, RowInput};
use bloc_types::{Entry, Mutable};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Errors that prevent assembling a block schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// An expression block cannot output a statement sequence.
    #[error("output connection of '{entry}' has type void")]
    VoidOutput { entry: String },
}

/// Assembly result type alias.
pub type AssembleResult<T> = Result<T, AssembleError>;

/// How a block attaches to its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    /// Untyped previous and next connections; stacks in a sequence.
    Statement,
    /// A single output connection, typed by `output` (`None` = any).
    Expression { output: Option<&'static str> },
}

/// The compiled definition of one block type.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSchema {
    #[serde(rename = "type")]
    pub block_type: String,
    pub rows: Vec<Row>,
    #[serde(flatten)]
    pub shape: Shape,
    pub inputs_inline: bool,
    pub tooltip: String,
    pub colour: String,
    #[serde(rename = "mutable", serialize_with = "serialize_hooks")]
    pub hooks: Option<Arc<dyn Mutable>>,
}

fn serialize_hooks<S: Serializer>(
    hooks: &Option<Arc<dyn Mutable>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_bool(hooks.is_some())
}

impl BlockSchema {
    pub fn has_previous(&self) -> bool {
        self.shape == Shape::Statement
    }

    pub fn has_next(&self) -> bool {
        self.shape == Shape::Statement
    }

    pub fn has_output(&self) -> bool {
        matches!(self.shape, Shape::Expression { .. })
    }

    /// Check token of the output connection; `None` for statement blocks
    /// and for untyped outputs.
    pub fn output_check(&self) -> Option<&'static str> {
        match self.shape {
            Shape::Expression { output } => output,
            Shape::Statement => None,
        }
    }

    /// True if the block carries lifecycle hooks.
    pub fn is_mutable(&self) -> bool {
        self.hooks.is_some()
    }

    /// The row ending in the named connection.
    pub fn input(&self, name: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.connection_name() == Some(name))
    }

    /// Value-input rows in order.
    pub fn value_inputs(&self) -> impl Iterator<Item = &Row> {
        self.rows
            .iter()
            .filter(|r| matches!(r.input, RowInput::Value { .. }))
    }
}

impl fmt::Debug for BlockSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockSchema")
            .field("block_type", &self.block_type)
            .field("rows", &self.rows)
            .field("shape", &self.shape)
            .field("inputs_inline", &self.inputs_inline)
            .field("tooltip", &self.tooltip)
            .field("colour", &self.colour)
            .field("mutable", &self.is_mutable())
            .finish()
    }
}

/// Build the schema for `entry` from its layout.
pub fn assemble(entry: &Entry, colour: &str, layout: Layout) -> AssembleResult<BlockSchema> {
    let shape = match &entry.output_connection {
        None => Shape::Statement,
        Some(output) => {
            let ty = ConnectionType::resolve(output)?;
            if ty.is_statement() {
                return Err(AssembleError::VoidOutput {
                    entry: entry.name.clone(),
                });
            }
            Shape::Expression { output: ty.check() }
        }
    };

    Ok(BlockSchema {
        block_type: entry.name.clone(),
        rows: layout.rows,
        shape,
        inputs_inline: entry.inputs_inline,
        tooltip: entry.description.clone(),
        colour: colour.to_string(),
        hooks: entry.hooks.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloc_layout::{lay_out, LayoutConfig};

    struct Counter;
    impl Mutable for Counter {}

    fn build(entry: &Entry) -> AssembleResult<BlockSchema> {
        let layout = lay_out(&entry.template, &LayoutConfig::default())?;
        assemble(entry, "#5b80a5", layout)
    }

    #[test]
    fn test_statement_block_shape() {
        let schema = build(&Entry::new("say").text("say")).unwrap();
        assert!(schema.has_previous());
        assert!(schema.has_next());
        assert!(!schema.has_output());
    }

    #[test]
    fn test_expression_block_shape() {
        let schema = build(&Entry::new("pi").text("π").output("number")).unwrap();
        assert!(!schema.has_previous());
        assert!(!schema.has_next());
        assert!(schema.has_output());
        assert_eq!(schema.output_check(), Some("Number"));
    }

    #[test]
    fn test_untyped_output() {
        let schema = build(&Entry::new("get").output("any")).unwrap();
        assert!(schema.has_output());
        assert_eq!(schema.output_check(), None);
    }

    #[test]
    fn test_void_output_rejected() {
        let err = build(&Entry::new("bad").output("void")).unwrap_err();
        assert_eq!(err, AssembleError::VoidOutput { entry: "bad".to_string() });
    }

    #[test]
    fn test_unsupported_output_type() {
        let err = build(&Entry::new("when").output("date")).unwrap_err();
        assert!(matches!(
            err,
            AssembleError::Layout(LayoutError::UnsupportedType { field: None, .. })
        ));
    }

    #[test]
    fn test_metadata_and_hooks() {
        let entry = Entry::new("counter")
            .describe("Counts up")
            .inline()
            .hooks(Counter);
        let schema = build(&entry).unwrap();
        assert_eq!(schema.tooltip, "Counts up");
        assert_eq!(schema.colour, "#5b80a5");
        assert!(schema.inputs_inline);
        assert!(schema.is_mutable());
    }

    #[test]
    fn test_schema_json_shape() {
        let schema = build(&Entry::new("and_gate").text("AND").output("boolean")).unwrap();
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["type"], "and_gate");
        assert_eq!(json["shape"], "expression");
        assert_eq!(json["output"], "Boolean");
        assert_eq!(json["inputsInline"], false);
        assert_eq!(json["mutable"], false);
        assert_eq!(json["tooltip"], "");
    }
}
