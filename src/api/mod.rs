//! Clipboard WASM API
//!
//! This module provides the JavaScript-facing API: a clipboard session bound to
//! the JS editor shell, the web-sys adapters it runs copy/cut against, and
//! shared utilities for serialization, validation and logging.
//!
//! # Module Structure
//!
//! - `helpers`: Logging macros, serde-wasm-bindgen helpers, selection validation
//! - `browser`: `ClipboardEvent`/`DataTransfer` and DOM selection adapters (wasm32)
//! - `session`: `ClipboardSession`, the exported session object (wasm32)

pub mod helpers;

#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(target_arch = "wasm32")]
pub mod session;

#[cfg(target_arch = "wasm32")]
pub use session::{ClipboardSession, EditorShell};
