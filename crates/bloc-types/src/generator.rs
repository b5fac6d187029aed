//! Per-block code generation callbacks.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::hooks::BlockView;

/// Turns one block into target-language code.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self, block: &dyn BlockView) -> String;
}

impl<F> CodeGenerator for F
where
    F: Fn(&dyn BlockView) -> String + Send + Sync,
{
    fn generate(&self, block: &dyn BlockView) -> String {
        self(block)
    }
}

/// A generator driven by a code template.
///
/// `{NAME}` is replaced by the value of widget `NAME`, or else by the code
/// of the block plugged into input `NAME`, or else by nothing.
/// `{{` and `}}` produce literal braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateGenerator {
    template: String,
}

impl TemplateGenerator {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    fn render(&self, block: &dyn BlockView) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(pos) = rest.find(['{', '}']) {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];

            if tail.starts_with("{{") || tail.starts_with("}}") {
                out.push_str(&tail[..1]);
                rest = &tail[2..];
                continue;
            }
            if tail.starts_with('}') {
                out.push('}');
                rest = &tail[1..];
                continue;
            }

            match placeholder(&tail[1..]) {
                Some(name) => {
                    let code = block
                        .field_value(name)
                        .or_else(|| block.input_code(name))
                        .unwrap_or_default();
                    out.push_str(&code);
                    rest = &tail[name.len() + 2..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Identifier at the start of `s` if it is immediately closed by `}`.
fn placeholder(s: &str) -> Option<&str> {
    let end = s.find('}')?;
    let name = &s[..end];
    let mut chars = name.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    chars
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
        .then_some(name)
}

impl CodeGenerator for TemplateGenerator {
    fn generate(&self, block: &dyn BlockView) -> String {
        self.render(block)
    }
}

/// Shared handle to an entry's [`CodeGenerator`].
///
/// Deserializes from a template string. The default generator emits no code.
#[derive(Clone)]
pub struct Generator(Arc<dyn CodeGenerator>);

impl Generator {
    pub fn new(generator: impl CodeGenerator + 'static) -> Self {
        Self(Arc::new(generator))
    }

    pub fn template(template: impl Into<String>) -> Self {
        Self::new(TemplateGenerator::new(template))
    }

    pub fn generate(&self, block: &dyn BlockView) -> String {
        self.0.generate(block)
    }

    /// True if both handles share the same generator instance.
    pub fn ptr_eq(&self, other: &Generator) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::template("")
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Generator(..)")
    }
}

impl<'de> Deserialize<'de> for Generator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeBlock {
        fields: HashMap<&'static str, &'static str>,
        inputs: HashMap<&'static str, &'static str>,
    }

    impl BlockView for FakeBlock {
        fn block_type(&self) -> &str {
            "and_gate"
        }

        fn field_value(&self, name: &str) -> Option<String> {
            self.fields.get(name).map(|v| v.to_string())
        }

        fn input_code(&self, name: &str) -> Option<String> {
            self.inputs.get(name).map(|v| v.to_string())
        }
    }

    fn block() -> FakeBlock {
        FakeBlock {
            fields: HashMap::from([("OP", "&&")]),
            inputs: HashMap::from([("A", "x"), ("B", "y")]),
        }
    }

    #[test]
    fn test_template_substitutes_fields_and_inputs() {
        let gen = TemplateGenerator::new("({A} {OP} {B})");
        assert_eq!(gen.generate(&block()), "(x && y)");
    }

    #[test]
    fn test_template_missing_name_renders_empty() {
        let gen = TemplateGenerator::new("f({MISSING})");
        assert_eq!(gen.generate(&block()), "f()");
    }

    #[test]
    fn test_template_escapes_and_stray_braces() {
        let gen = TemplateGenerator::new("if ({A}) {{ run(); }} { not a name } }");
        assert_eq!(gen.generate(&block()), "if (x) { run(); } { not a name } }");
    }

    #[test]
    fn test_closure_generator() {
        let gen = Generator::new(|b: &dyn BlockView| format!("{}()", b.block_type()));
        assert_eq!(gen.generate(&block()), "and_gate()");
    }

    #[test]
    fn test_default_generator_is_empty() {
        assert_eq!(Generator::default().generate(&block()), "");
    }

    #[test]
    fn test_generator_from_json_string() {
        let gen: Generator = serde_json::from_str(r#""{A} + {B}""#).unwrap();
        assert_eq!(gen.generate(&block()), "x + y");
    }
}
