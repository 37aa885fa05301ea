//! Error types for clipboard export
//!
//! Most clipboard "failures" are policy branches (collapsed selection, missing
//! rendered element, no clipboard API) and never reach this type. What remains
//! are structural faults: a selection that does not point into the document, or
//! a payload that cannot be encoded or decoded.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Top-level clipboard error type
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// Selection references a block key that is not in the document
    #[error("Unknown block key: {0}")]
    UnknownBlock(String),

    /// Selection endpoints are out of order or out of bounds
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Raw encoding could not be produced or parsed
    #[error("Raw content serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Raw payload parsed but does not describe a valid fragment
    #[error("Malformed clipboard payload: {0}")]
    MalformedPayload(String),

    /// Platform refused a clipboard data write
    #[error("Clipboard write failed for {format}: {reason}")]
    ClipboardWrite { format: String, reason: String },
}
