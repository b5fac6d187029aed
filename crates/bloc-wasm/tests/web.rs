//! Browser-side tests for the JS object surface.
//!
//! Run with `wasm-pack test --headless --firefox crates/bloc-wasm`.

#![cfg(target_arch = "wasm32")]

use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn to_js(value: &serde_json::Value) -> JsValue {
    value.serialize(&Serializer::json_compatible()).unwrap()
}

fn vocab() -> JsValue {
    let json = serde_json::json!([{
        "name": "Text",
        "entries": [{
            "name": "join",
            "template": [
                {"blocklyInput": {"type": "string", "name": "A"}},
                {"blocklyInput": {"type": "string", "name": "B"}}
            ],
            "outputConnection": {"type": "string"}
        }]
    }]);
    to_js(&json)
}

#[wasm_bindgen_test]
fn compile_object_returns_plain_object() {
    let result = bloc_wasm::compile_object(vocab(), JsValue::UNDEFINED).unwrap();
    let result: serde_json::Value = serde_wasm_bindgen::from_value(result).unwrap();
    assert_eq!(result["success"], true);
    assert_eq!(result["blocks"][0]["output"], "String");
}

#[wasm_bindgen_test]
fn compile_object_rejects_bad_options() {
    let options = to_js(&serde_json::json!({"duplicates": 3}));
    assert!(bloc_wasm::compile_object(vocab(), options).is_err());
}
