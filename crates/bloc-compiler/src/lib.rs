//! bloc compiler: orchestrates vocabulary compilation.
//!
//! ```text
//! [Category] → per entry: layout → schema assembly → registration → BlockReference
//!            → CategoryManifest → ToolboxManifest (+ Vocabulary)
//! ```
//!
//! [`compile`] works on in-memory categories and host-owned registries.
//! [`compile_to_result`] is the JSON-in, JSON-out surface used by the CLI and
//! the WASM module.

pub mod blockly;
pub mod category;
pub mod compiler;
pub mod options;
pub mod registry;
pub mod schema;
pub mod toolbox;
pub mod vocabulary;

use std::collections::HashSet;

use bloc_types::{BlocError, Category, Diagnostics, ErrorCode, Origin};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

pub use category::{BlockReference, CategoryManifest, ItemKind};
pub use compiler::{compile, CompileOutput};
pub use options::{CompileOptions, DuplicatePolicy};
pub use registry::{BlockRegistry, GeneratorTable};
pub use schema::{AssembleError, AssembleResult, BlockSchema, Shape};
pub use toolbox::{default_categories, ToolboxManifest};
pub use vocabulary::{Param, Vocabulary, VocabularyEntry};

pub use bloc_layout::UnknownFieldPolicy;

// ══════════════════════════════════════════════════════════════════════════════
// JSON vocabularies
// ══════════════════════════════════════════════════════════════════════════════

/// Parse a JSON vocabulary: either an array of categories or an object with
/// a `"categories"` array.
pub fn parse_vocabulary(source: &str) -> Result<Vec<Category>, BlocError> {
    let value: Value = serde_json::from_str(source)
        .map_err(|e| invalid_vocabulary(format!("malformed JSON: {e}")))?;
    categories_from_value(value)
}

/// Like [`parse_vocabulary`], for an already-parsed document.
pub fn categories_from_value(value: Value) -> Result<Vec<Category>, BlocError> {
    let categories = match value {
        array @ Value::Array(_) => array,
        Value::Object(mut map) => map.remove("categories").ok_or_else(|| {
            invalid_vocabulary("vocabulary object has no \"categories\" field")
                .with_suggestion("wrap the categories as {\"categories\": [...]}")
        })?,
        _ => {
            return Err(invalid_vocabulary(
                "expected an array of categories or an object with a \"categories\" array",
            ))
        }
    };

    serde_json::from_value(categories)
        .map_err(|e| invalid_vocabulary(format!("invalid vocabulary: {e}")))
}

fn invalid_vocabulary(message: impl Into<String>) -> BlocError {
    BlocError::new(ErrorCode::INVALID_VOCABULARY, message, Origin::document())
}

// ══════════════════════════════════════════════════════════════════════════════
// CompileResult
// ══════════════════════════════════════════════════════════════════════════════

/// Self-contained result of compiling a JSON vocabulary.
#[derive(Debug, Clone, Serialize)]
pub struct CompileResult {
    /// True if no entry failed and the document parsed.
    pub success: bool,
    /// `None` only when the document itself could not be parsed.
    pub toolbox: Option<ToolboxManifest>,
    /// Editor block definitions for every compiled block, in toolbox order.
    pub blocks: Vec<Value>,
    pub vocab: Option<Vocabulary>,
    pub diagnostics: Diagnostics,
    /// SHA-256 of the toolbox and block definitions, hex-encoded.
    pub fingerprint: Option<String>,
}

impl CompileResult {
    fn failed(diagnostics: Diagnostics) -> Self {
        Self {
            success: false,
            toolbox: None,
            blocks: Vec::new(),
            vocab: None,
            diagnostics,
            fingerprint: None,
        }
    }
}

/// Compile a JSON vocabulary with fresh registries.
pub fn compile_to_result(source: &str, options: &CompileOptions) -> CompileResult {
    compile_parsed(parse_vocabulary(source), options)
}

/// Like [`compile_to_result`], for an already-parsed document.
pub fn compile_value_to_result(value: Value, options: &CompileOptions) -> CompileResult {
    compile_parsed(categories_from_value(value), options)
}

fn compile_parsed(parsed: Result<Vec<Category>, BlocError>, options: &CompileOptions) -> CompileResult {
    let categories = match parsed {
        Ok(categories) => categories,
        Err(error) => {
            log::error!("{error}");
            let mut diagnostics = Diagnostics::empty();
            diagnostics.push(error);
            return CompileResult::failed(diagnostics);
        }
    };

    let mut blocks = BlockRegistry::new();
    let mut generators = GeneratorTable::new();
    let output = compile(&categories, &mut blocks, &mut generators, options);

    let definitions: Vec<Value> = {
        let mut emitted = HashSet::new();
        output
            .toolbox
            .block_types()
            .filter(|name| emitted.insert(*name))
            .filter_map(|name| blocks.get(name))
            .map(BlockSchema::to_blockly_json)
            .collect()
    };

    let fingerprint = fingerprint(&output.toolbox, &definitions);
    CompileResult {
        success: output.is_success(),
        toolbox: Some(output.toolbox),
        blocks: definitions,
        vocab: output.vocab,
        diagnostics: output.diagnostics,
        fingerprint,
    }
}

/// Compile a JSON vocabulary and return only its diagnostics.
pub fn check(source: &str, options: &CompileOptions) -> Diagnostics {
    compile_to_result(source, options).diagnostics
}

fn fingerprint(toolbox: &ToolboxManifest, definitions: &[Value]) -> Option<String> {
    let bytes = serde_json::to_vec(&(toolbox, definitions)).ok()?;
    let digest = Sha256::digest(&bytes);
    Some(digest.iter().map(|b| format!("{b:02x}")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array_and_object_forms() {
        let array = parse_vocabulary(r#"[{"name": "Logic", "entries": []}]"#).unwrap();
        let object =
            parse_vocabulary(r#"{"categories": [{"name": "Logic", "entries": []}]}"#).unwrap();
        assert_eq!(array.len(), 1);
        assert_eq!(object[0].name, array[0].name);
    }

    #[test]
    fn test_parse_errors_are_invalid_vocabulary() {
        for source in ["not json", "42", r#"{"blocks": []}"#, r#"[{"entries": []}]"#] {
            let err = parse_vocabulary(source).unwrap_err();
            assert_eq!(err.code, ErrorCode::INVALID_VOCABULARY, "source: {source}");
            assert_eq!(err.origin, Origin::document());
        }
    }

    #[test]
    fn test_value_and_text_forms_agree() {
        let source = r#"[{"name": "C", "entries": [{"name": "x", "template": [{"text": "go"}]}]}]"#;
        let value: Value = serde_json::from_str(source).unwrap();
        let from_text = compile_to_result(source, &CompileOptions::default());
        let from_value = compile_value_to_result(value, &CompileOptions::default());
        assert_eq!(from_text.fingerprint, from_value.fingerprint);
    }

    #[test]
    fn test_unparseable_document_fails_whole_result() {
        let result = compile_to_result("{", &CompileOptions::default());
        assert!(!result.success);
        assert!(result.toolbox.is_none());
        assert!(result.fingerprint.is_none());
        assert_eq!(result.diagnostics.total_errors, 1);
    }

    #[test]
    fn test_fingerprint_is_hex_sha256() {
        let result = compile_to_result("[]", &CompileOptions::default());
        let fingerprint = result.fingerprint.unwrap();
        assert_eq!(fingerprint.len(), 64);
        assert!(fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_check_reports_diagnostics_only() {
        let source = r#"[{"name": "C", "entries": [
            {"name": "x", "template": [{"blocklyInput": {"type": "date", "name": "D"}}]}
        ]}]"#;
        let diagnostics = check(source, &CompileOptions::default());
        assert!(diagnostics.contains(ErrorCode::UNSUPPORTED_TYPE));
    }

    #[test]
    fn test_field_mixing_two_shapes_is_unknown() {
        let source = r#"[{"name": "C", "entries": [
            {"name": "x", "template": [{"text": "a", "blocklyInput": {"type": "number", "name": "N"}}]}
        ]}]"#;
        let diagnostics = check(source, &CompileOptions::default());
        assert!(diagnostics.contains(ErrorCode::UNKNOWN_FIELD));
        assert_eq!(diagnostics.errors[0].origin.field, Some(0));
    }
}
