//! bloc compiler as a WASM module for browser environments.
//!
//! This crate exposes vocabulary compilation via `wasm-bindgen`, so an
//! editor page can compile its block vocabulary in the browser.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { compile } from 'bloc-wasm';
//!
//! await init();
//!
//! const result = JSON.parse(compile(vocabJson, '{"default_categories": true}'));
//! workspace.updateToolbox(result.toolbox);
//! Blockly.defineBlocksWithJsonArray(result.blocks);
//! ```

use bloc_compiler::{CompileOptions, CompileResult};
use bloc_types::{BlocError, Diagnostics, ErrorCode, Origin};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Compile a JSON vocabulary.
///
/// `options_json` is a JSON `CompileOptions` object; an empty string means
/// defaults. Returns a JSON string containing a `CompileResult`:
/// ```json
/// {
///   "success": true,
///   "toolbox": { "kind": "categoryToolbox", "contents": [ ... ] },
///   "blocks": [ { "type": "and_gate", "message0": "AND %1 %2 ...", ... } ],
///   "vocab": null,
///   "diagnostics": { "errors": [], "warnings": [], "total_errors": 0, "total_warnings": 0 },
///   "fingerprint": "3b1f..."
/// }
/// ```
///
/// On failure, `success` is `false` and `diagnostics` says which entries
/// failed; the entries that compiled are still present.
#[wasm_bindgen]
pub fn compile(vocab_json: &str, options_json: &str) -> String {
    let result = match parse_options(options_json) {
        Ok(options) => bloc_compiler::compile_to_result(vocab_json, &options),
        Err(error) => options_failure(error),
    };
    to_json(&result)
}

/// Compile a vocabulary given as a JS object, returning a JS object.
///
/// Same contract as [`compile`] without the JSON text round trip.
#[wasm_bindgen(js_name = compileObject)]
pub fn compile_object(vocab: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let options: CompileOptions = if options.is_undefined() || options.is_null() {
        CompileOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)?
    };
    let vocab: serde_json::Value = serde_wasm_bindgen::from_value(vocab)?;
    let result = bloc_compiler::compile_value_to_result(vocab, &options);
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(result.serialize(&serializer)?)
}

/// Check a JSON vocabulary without producing definitions.
///
/// Returns a JSON string containing structured errors/warnings.
#[wasm_bindgen]
pub fn check(vocab_json: &str, options_json: &str) -> String {
    let diagnostics = match parse_options(options_json) {
        Ok(options) => bloc_compiler::check(vocab_json, &options),
        Err(error) => options_failure(error).diagnostics,
    };
    to_json(&diagnostics)
}

/// Return the compact text reference for a vocabulary.
///
/// Empty if the vocabulary does not parse.
#[wasm_bindgen]
pub fn reference(vocab_json: &str) -> String {
    let options = CompileOptions {
        vocabulary: true,
        ..CompileOptions::default()
    };
    bloc_compiler::compile_to_result(vocab_json, &options)
        .vocab
        .map(|vocab| vocab.to_reference())
        .unwrap_or_default()
}

/// Return the compiler version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn parse_options(options_json: &str) -> Result<CompileOptions, BlocError> {
    if options_json.trim().is_empty() {
        return Ok(CompileOptions::default());
    }
    serde_json::from_str(options_json).map_err(|e| {
        BlocError::new(
            ErrorCode::INVALID_VOCABULARY,
            format!("invalid compile options: {e}"),
            Origin::document(),
        )
    })
}

fn options_failure(error: BlocError) -> CompileResult {
    let mut diagnostics = Diagnostics::empty();
    diagnostics.push(error);
    CompileResult {
        success: false,
        toolbox: None,
        blocks: Vec::new(),
        vocab: None,
        diagnostics,
        fingerprint: None,
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| serialization_failure(&e.to_string()))
}

fn serialization_failure(message: &str) -> String {
    serde_json::json!({
        "success": false,
        "diagnostics": {
            "errors": [{"message": format!("Serialization error: {message}")}],
            "warnings": [],
            "total_errors": 1,
            "total_warnings": 0,
        },
    })
    .to_string()
}
