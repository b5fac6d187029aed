//! Blockly JSON block definitions.
//!
//! A schema's rows flatten into one `message0` string with `%n`
//! placeholders and a parallel `args0` array. Each row contributes its
//! fragments followed by the input that closes it.

use bloc_layout::{Fragment, Row, RowInput};
use serde_json::{json, Map, Value};

use crate::schema::{BlockSchema, Shape};

/// Pixel size of the help image.
const HELP_ICON_SIZE: u32 = 16;

impl BlockSchema {
    /// Render as an editor JSON block definition.
    pub fn to_blockly_json(&self) -> Value {
        let mut message = Message::default();
        for row in &self.rows {
            message.push_row(row);
        }

        let mut def = Map::new();
        def.insert("type".into(), Value::from(self.block_type.as_str()));
        def.insert("message0".into(), Value::from(message.text()));
        def.insert("args0".into(), Value::Array(message.args));
        match self.shape {
            Shape::Statement => {
                def.insert("previousStatement".into(), Value::Null);
                def.insert("nextStatement".into(), Value::Null);
            }
            Shape::Expression { output } => {
                def.insert("output".into(), output.map_or(Value::Null, Value::from));
            }
        }
        def.insert("colour".into(), Value::from(self.colour.as_str()));
        def.insert("tooltip".into(), Value::from(self.tooltip.as_str()));
        def.insert("inputsInline".into(), Value::Bool(self.inputs_inline));
        Value::Object(def)
    }
}

#[derive(Default)]
struct Message {
    tokens: Vec<String>,
    args: Vec<Value>,
}

impl Message {
    fn text(&self) -> String {
        self.tokens.join(" ")
    }

    fn push_text(&mut self, text: &str) {
        self.tokens.push(text.replace('%', "%%"));
    }

    fn push_arg(&mut self, arg: Value) {
        self.args.push(arg);
        self.tokens.push(format!("%{}", self.args.len()));
    }

    fn push_row(&mut self, row: &Row) {
        for fragment in &row.fragments {
            match fragment {
                Fragment::Label { text } => self.push_text(text),
                Fragment::Widget { name, widget } => {
                    let mut arg = Map::new();
                    arg.insert("type".into(), Value::from(widget.kind.as_str()));
                    arg.insert("name".into(), Value::from(name.as_str()));
                    for (key, value) in &widget.props {
                        arg.insert(key.clone(), value.clone());
                    }
                    self.push_arg(Value::Object(arg));
                }
                Fragment::Help { src } => self.push_arg(json!({
                    "type": "field_image",
                    "src": src,
                    "width": HELP_ICON_SIZE,
                    "height": HELP_ICON_SIZE,
                    "alt": "?",
                })),
            }
        }

        let input = match &row.input {
            RowInput::Dummy => json!({ "type": "input_dummy" }),
            RowInput::Value { name, check, .. } => {
                let mut arg = json!({ "type": "input_value", "name": name });
                if let Some(check) = check {
                    arg["check"] = Value::from(*check);
                }
                arg
            }
            RowInput::Statement { name, .. } => json!({ "type": "input_statement", "name": name }),
        };
        self.push_arg(input);
    }
}
