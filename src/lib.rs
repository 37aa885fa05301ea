//! Rich-Text Editor Clipboard WASM Module
//!
//! Copy and cut for a block-structured rich-text editor: the selected range is
//! extracted as a fragment, cached for same-session paste, and exported as plain
//! text plus HTML that embeds the raw fragment encoding and rebuilds indented
//! blocks as nested lists.

pub mod api;
pub mod clipboard;
pub mod config;
pub mod converters;
pub mod error;
pub mod fragment;
pub mod html_layout;
pub mod models;
pub mod structure;
pub mod undo;

// Re-export commonly used types
pub use clipboard::{begin_cut, copy, ClipboardCache, CopyOutcome, PendingCut};
pub use config::ClipboardConfig;
pub use error::{ClipboardError, Result};
pub use fragment::{extract, Fragment};
pub use models::{ContentBlock, ContentState, EditorState, SelectionState};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already initialized: {}", e).into());
    }

    log::info!("Editor clipboard WASM module initialized");
}
