//! Shared helpers for WASM API operations
//!
//! This module contains common patterns and utilities for serialization,
//! deserialization and error conversion across the JavaScript-facing API.

use crate::error::ClipboardError;
use crate::models::{ContentState, SelectionState};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        log::debug!("[WASM] {}", format!($($arg)*))
    };
}

/// Log an info message with [WASM] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        log::info!("[WASM] {}", format!($($arg)*))
    };
}

/// Log a warning message with [WASM] ⚠️ prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        log::warn!("[WASM] ⚠️ {}", format!($($arg)*))
    };
}

/// Log an error message with [WASM] ❌ prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        log::error!("[WASM] ❌ {}", format!($($arg)*))
    };
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        wasm_error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Deserialize an optional value; `undefined`/`null` give the default
pub fn deserialize_or_default<T: DeserializeOwned + Default>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    deserialize(value, error_context)
}

/// Serialize a value to JavaScript with automatic error handling
///
/// Maps become plain objects so raw content reads like JSON on the JS side.
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| {
            let msg = format!("{}: {}", error_context, e);
            wasm_error!("{}", msg);
            JsValue::from_str(&msg)
        })
}

// ============================================================================
// Validation Helpers
// ============================================================================

/// Validate that a selection points into the content, in document order
pub fn validate_selection(
    content: &ContentState,
    selection: &SelectionState,
) -> Result<(), String> {
    let (start, end) = content
        .selection_bounds(selection)
        .map_err(|e| e.to_string())?;

    let start_len = content.blocks()[start].len();
    if selection.start_offset() > start_len {
        return Err(format!(
            "Start offset {} out of bounds (block length: {})",
            selection.start_offset(),
            start_len
        ));
    }

    let end_len = content.blocks()[end].len();
    if selection.end_offset() > end_len {
        return Err(format!(
            "End offset {} out of bounds (block length: {})",
            selection.end_offset(),
            end_len
        ));
    }

    Ok(())
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Convert a validation error to a JsValue
pub fn validation_error(msg: impl Into<String>) -> JsValue {
    let msg = msg.into();
    wasm_error!("{}", msg);
    JsValue::from_str(&msg)
}

/// Convert a clipboard error to a JsValue
pub fn clipboard_error(err: ClipboardError) -> JsValue {
    validation_error(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentBlock;

    fn content() -> ContentState {
        ContentState::new(vec![ContentBlock::new("a", "hello"), ContentBlock::new("b", "hi")])
    }

    #[test]
    fn test_validate_selection_accepts_in_bounds() {
        assert!(validate_selection(&content(), &SelectionState::new("a", 1, "b", 2)).is_ok());
        assert!(validate_selection(&content(), &SelectionState::collapsed("a", 5)).is_ok());
    }

    #[test]
    fn test_validate_selection_rejects_offsets_past_block_end() {
        let err = validate_selection(&content(), &SelectionState::new("a", 0, "b", 3)).unwrap_err();
        assert!(err.contains("End offset 3"));
        let err = validate_selection(&content(), &SelectionState::new("a", 6, "b", 0)).unwrap_err();
        assert!(err.contains("Start offset 6"));
    }

    #[test]
    fn test_validate_selection_rejects_unknown_keys() {
        assert!(validate_selection(&content(), &SelectionState::collapsed("zz", 0)).is_err());
    }
}
