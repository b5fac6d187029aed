//! The vocabulary model: categories of entries, each entry describing one
//! block type by an ordered field template.
//!
//! Everything here is caller-owned input. The JSON form uses the editor's
//! camelCase names (`blocklyInput`, `outputConnection`, `inputsInline`).
//! Order is significant everywhere and is preserved as declared.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::generator::{CodeGenerator, Generator};
use crate::hooks::Mutable;
use crate::widget::WidgetSource;

/// Colour used when a category declares none.
pub const DEFAULT_COLOR: &str = "#000000";

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

// ══════════════════════════════════════════════════════════════════════════════
// Category
// ══════════════════════════════════════════════════════════════════════════════

/// A named, coloured group of entries.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub name: String,
    /// CSS hex colour shared by every block in the category.
    #[serde(default = "default_color", alias = "colour")]
    pub color: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: default_color(),
            entries: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Entry
// ══════════════════════════════════════════════════════════════════════════════

/// One block type.
///
/// `name` is the block-type identifier and is expected to be unique across
/// the whole vocabulary.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub template: Vec<Field>,
    /// Present for expression blocks; absent for statement blocks.
    #[serde(default)]
    pub output_connection: Option<TypedConnection>,
    #[serde(default)]
    pub inputs_inline: bool,
    #[serde(skip)]
    pub hooks: Option<Arc<dyn Mutable>>,
    #[serde(default, rename = "generator")]
    pub code_generator: Generator,
}

impl Entry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            template: Vec::new(),
            output_connection: None,
            inputs_inline: false,
            hooks: None,
            code_generator: Generator::default(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.template.push(Field::text(text));
        self
    }

    pub fn widget(mut self, name: impl Into<String>, source: WidgetSource) -> Self {
        self.template.push(Field::widget(name, source));
        self
    }

    pub fn input(mut self, connection: TypedConnection) -> Self {
        self.template.push(Field::connection(connection));
        self
    }

    /// Make this an expression block whose output carries `type_tag`.
    pub fn output(mut self, type_tag: impl Into<String>) -> Self {
        self.output_connection = Some(TypedConnection::new(type_tag, ""));
        self
    }

    pub fn inline(mut self) -> Self {
        self.inputs_inline = true;
        self
    }

    pub fn hooks(mut self, hooks: impl Mutable + 'static) -> Self {
        self.hooks = Some(Arc::new(hooks));
        self
    }

    pub fn generator(mut self, generator: impl CodeGenerator + 'static) -> Self {
        self.code_generator = Generator::new(generator);
        self
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("template", &self.template)
            .field("output_connection", &self.output_connection)
            .field("inputs_inline", &self.inputs_inline)
            .field("mutable", &self.hooks.is_some())
            .finish_non_exhaustive()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Fields
// ══════════════════════════════════════════════════════════════════════════════

/// One element of an entry's template.
///
/// Declarative input that matches none of the known shapes, including one
/// that mixes the keys of two shapes, is kept as [`Field::Unrecognized`] so
/// the layout engine can report it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Field {
    Text(TextField),
    Widget(WidgetField),
    Connection(ConnectionField),
    Unrecognized(Value),
}

impl Field {
    pub fn text(text: impl Into<String>) -> Self {
        Field::Text(TextField { text: text.into() })
    }

    pub fn widget(name: impl Into<String>, field: WidgetSource) -> Self {
        Field::Widget(WidgetField {
            name: name.into(),
            field,
        })
    }

    pub fn connection(connection: TypedConnection) -> Self {
        Field::Connection(ConnectionField {
            blockly_input: connection,
        })
    }
}

/// Literal label text. Each `'\n'` starts a new row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextField {
    pub text: String,
}

/// A user-editable control, retrievable later by `name`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetField {
    pub name: String,
    pub field: WidgetSource,
}

/// A typed slot for a child block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionField {
    #[serde(rename = "blocklyInput")]
    pub blockly_input: TypedConnection,
}

// ══════════════════════════════════════════════════════════════════════════════
// Connections
// ══════════════════════════════════════════════════════════════════════════════

/// A named connection with an abstract type tag.
///
/// `type_tag` is kept as written; it is resolved (and rejected if unknown)
/// only when the entry is compiled. `None` means untyped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedConnection {
    #[serde(rename = "type", default)]
    pub type_tag: Option<String>,
    #[serde(default)]
    pub name: String,
    /// Block type of a default sub-block to pre-attach.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
}

impl TypedConnection {
    pub fn new(type_tag: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_tag: Some(type_tag.into()),
            name: name.into(),
            shadow: None,
        }
    }

    /// An untyped connection.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            type_tag: None,
            name: name.into(),
            shadow: None,
        }
    }

    pub fn with_shadow(mut self, block_type: impl Into<String>) -> Self {
        self.shadow = Some(block_type.into());
        self
    }
}
