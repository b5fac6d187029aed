//! Input rows: one horizontal line of a block.

use bloc_types::FieldWidget;
use serde::Serialize;

/// A default sub-block pre-attached to an empty connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shadow {
    #[serde(rename = "type")]
    pub block_type: String,
}

/// What a row ends in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowInput {
    /// No connection; the row only carries labels and widgets.
    Dummy,
    /// A value slot. `check` restricts it to one type; `None` accepts any.
    Value {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        check: Option<&'static str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        shadow: Option<Shadow>,
    },
    /// A slot taking a sequence of statement blocks.
    Statement {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        shadow: Option<Shadow>,
    },
}

/// Row content, rendered left to right before the row's input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fragment {
    Label { text: String },
    Widget { name: String, widget: FieldWidget },
    /// The help affordance closing every block.
    Help { src: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub input: RowInput,
    pub fragments: Vec<Fragment>,
}

impl Row {
    pub fn dummy() -> Self {
        Self::with_input(RowInput::Dummy)
    }

    pub fn value(name: impl Into<String>, check: Option<&'static str>, shadow: Option<Shadow>) -> Self {
        Self::with_input(RowInput::Value {
            name: name.into(),
            check,
            shadow,
        })
    }

    pub fn statement(name: impl Into<String>, shadow: Option<Shadow>) -> Self {
        Self::with_input(RowInput::Statement {
            name: name.into(),
            shadow,
        })
    }

    fn with_input(input: RowInput) -> Self {
        Self {
            input,
            fragments: Vec::new(),
        }
    }

    /// Append label text. Empty text adds nothing.
    pub fn push_label(&mut self, text: &str) {
        if !text.is_empty() {
            self.fragments.push(Fragment::Label {
                text: text.to_string(),
            });
        }
    }

    pub fn push_widget(&mut self, name: impl Into<String>, widget: FieldWidget) {
        self.fragments.push(Fragment::Widget {
            name: name.into(),
            widget,
        });
    }

    pub fn push_help(&mut self, src: impl Into<String>) {
        self.fragments.push(Fragment::Help { src: src.into() });
    }

    pub fn is_dummy(&self) -> bool {
        self.input == RowInput::Dummy
    }

    /// A dummy row with no content at all.
    pub fn is_empty_dummy(&self) -> bool {
        self.is_dummy() && self.fragments.is_empty()
    }

    /// Name of the row's connection, if it has one.
    pub fn connection_name(&self) -> Option<&str> {
        match &self.input {
            RowInput::Dummy => None,
            RowInput::Value { name, .. } | RowInput::Statement { name, .. } => Some(name),
        }
    }

    pub fn shadow(&self) -> Option<&Shadow> {
        match &self.input {
            RowInput::Dummy => None,
            RowInput::Value { shadow, .. } | RowInput::Statement { shadow, .. } => shadow.as_ref(),
        }
    }

    /// Label texts in order.
    pub fn labels(&self) -> Vec<&str> {
        self.fragments
            .iter()
            .filter_map(|f| match f {
                Fragment::Label { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_help(&self) -> bool {
        self.fragments
            .iter()
            .any(|f| matches!(f, Fragment::Help { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_label_is_dropped() {
        let mut row = Row::dummy();
        row.push_label("");
        assert!(row.is_empty_dummy());
        row.push_label("go");
        assert_eq!(row.labels(), vec!["go"]);
    }

    #[test]
    fn test_connection_name() {
        assert_eq!(Row::dummy().connection_name(), None);
        assert_eq!(Row::value("A", None, None).connection_name(), Some("A"));
        assert_eq!(Row::statement("DO", None).connection_name(), Some("DO"));
    }

    #[test]
    fn test_row_json_shape() {
        let shadow = Shadow {
            block_type: "math_number".to_string(),
        };
        let row = Row::value("N", Some("Number"), Some(shadow));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "input": {"kind": "value", "name": "N", "check": "Number", "shadow": {"type": "math_number"}},
                "fragments": []
            })
        );
    }
}
