//! Shared helpers for WASM API operations
//!
//! Serialization, config loading and error conversion used by the
//! JavaScript-facing classes.

use wasm_bindgen::prelude::*;
use serde::Serialize;

use crate::dom::DomError;
use crate::models::EngineConfig;

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Read an `EngineConfig` from a JS object.
///
/// `undefined` and `null` give the defaults; a string is parsed as JSON.
pub fn config_from_js(value: JsValue) -> Result<EngineConfig, DomError> {
    if value.is_undefined() || value.is_null() {
        return Ok(EngineConfig::default());
    }

    if let Some(json) = value.as_string() {
        return EngineConfig::from_json(&json).map_err(|e| DomError::Config(e.to_string()));
    }

    serde_wasm_bindgen::from_value::<EngineConfig>(value)
        .map(EngineConfig::sanitized)
        .map_err(|e| DomError::Config(e.to_string()))
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Log a DOM error and turn it into a JsValue
pub fn js_error(err: DomError) -> JsValue {
    log::error!("{}", err);
    err.into()
}
