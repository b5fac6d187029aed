//! Editable field widgets and the factories that produce them.
//!
//! Widget instances belong to exactly one block, so a [`WidgetField`]
//! carries a factory rather than a widget: the compiler asks it for a fresh
//! instance every time the entry is compiled.
//!
//! [`WidgetField`]: crate::vocab::WidgetField

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A concrete field widget, in the editor's JSON shape
/// (`{"type": "field_input", "text": "..."}`).
///
/// The widget's `name` is not stored here; it comes from the owning
/// widget field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldWidget {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub props: Map<String, Value>,
}

impl FieldWidget {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            props: Map::new(),
        }
    }

    /// Set a widget property, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// An editable text input.
    pub fn text_input(default: impl Into<String>) -> Self {
        Self::new("field_input").with("text", default.into())
    }

    /// A number input.
    pub fn number(default: f64) -> Self {
        Self::new("field_number").with("value", default)
    }

    /// A dropdown of `(label, value)` options.
    pub fn dropdown<L, V>(options: impl IntoIterator<Item = (L, V)>) -> Self
    where
        L: Into<String>,
        V: Into<String>,
    {
        let options: Vec<Value> = options
            .into_iter()
            .map(|(label, value)| Value::from(vec![label.into(), value.into()]))
            .collect();
        Self::new("field_dropdown").with("options", options)
    }

    /// A checkbox.
    pub fn checkbox(checked: bool) -> Self {
        Self::new("field_checkbox").with("checked", checked)
    }
}

/// Produces a fresh widget instance on every call.
pub trait WidgetFactory: Send + Sync {
    fn create(&self) -> FieldWidget;
}

impl<F> WidgetFactory for F
where
    F: Fn() -> FieldWidget + Send + Sync,
{
    fn create(&self) -> FieldWidget {
        self()
    }
}

/// Shared handle to a [`WidgetFactory`].
///
/// Deserializes from a widget template object; the resulting factory clones
/// the template on each call.
#[derive(Clone)]
pub struct WidgetSource(Arc<dyn WidgetFactory>);

impl WidgetSource {
    pub fn new(factory: impl WidgetFactory + 'static) -> Self {
        Self(Arc::new(factory))
    }

    /// A factory that hands out copies of `template`.
    pub fn template(template: FieldWidget) -> Self {
        Self::new(move || template.clone())
    }

    pub fn create(&self) -> FieldWidget {
        self.0.create()
    }
}

impl fmt::Debug for WidgetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WidgetSource(..)")
    }
}

impl<'de> Deserialize<'de> for WidgetSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        FieldWidget::deserialize(deserializer).map(Self::template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_widget_json_shape() {
        let json = serde_json::to_value(FieldWidget::text_input("hello")).unwrap();
        assert_eq!(json, serde_json::json!({"type": "field_input", "text": "hello"}));
    }

    #[test]
    fn test_dropdown_options() {
        let widget = FieldWidget::dropdown([("Up", "UP"), ("Down", "DOWN")]);
        assert_eq!(widget.props["options"], serde_json::json!([["Up", "UP"], ["Down", "DOWN"]]));
    }

    #[test]
    fn test_closure_factory_runs_every_time() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let source = WidgetSource::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            FieldWidget::checkbox(true)
        });
        source.create();
        source.create();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_template_source_from_json() {
        let source: WidgetSource =
            serde_json::from_str(r#"{"type": "field_number", "value": 3}"#).unwrap();
        let a = source.create();
        let b = source.create();
        assert_eq!(a, b);
        assert_eq!(a.kind, "field_number");
    }
}
