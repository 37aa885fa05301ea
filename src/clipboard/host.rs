//! Collaborator interfaces for clipboard operations
//!
//! Copy and cut only talk to the outside world through these traits: the
//! editor shell that owns mode and DOM control, the platform clipboard event,
//! and the capture of the live rendered selection.

use crate::error::Result;
use crate::html_layout::Element;
use crate::models::EditorState;
use serde::{Deserialize, Serialize};

pub const MIME_PLAIN_TEXT: &str = "text/plain";
pub const MIME_HTML: &str = "text/html";

/// Editor event-handling mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditorMode {
    /// Normal editing; the editor handles its own events
    Edit,
    /// A native cut is in flight; editor event handling is suspended
    Cut,
}

impl EditorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorMode::Edit => "edit",
            EditorMode::Cut => "cut",
        }
    }
}

/// Scroll offsets saved before a cut and restored with the DOM
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollPosition {
    pub x: f64,
    pub y: f64,
}

/// The editor shell
pub trait EditorHost {
    /// Current editor state
    fn editor_state(&self) -> &EditorState;

    /// Enter a mode (suspends normal event handling for `Cut`)
    fn set_mode(&mut self, mode: EditorMode);

    /// Return to the default mode
    fn exit_current_mode(&mut self);

    fn scroll_position(&self) -> ScrollPosition;

    /// Re-render the editor DOM from the model, reclaiming it after a native edit
    fn restore_editor_dom(&mut self, scroll: ScrollPosition);

    /// Install a new editor state
    fn update(&mut self, state: EditorState);
}

/// Writable clipboard data of a platform clipboard event
pub trait ClipboardDataWriter {
    fn set_data(&mut self, format: &str, data: &str) -> Result<()>;
}

/// A platform clipboard (copy/cut) event
pub trait ClipboardEventSink {
    /// Suppress the platform's default action
    fn prevent_default(&mut self);

    /// Clipboard data, when the platform exposes a write API
    fn clipboard_data(&mut self) -> Option<&mut dyn ClipboardDataWriter>;
}

/// Capture of the live, rendered selection
pub trait SelectionCapture {
    /// Detached copy of the selected DOM, rooted in a container element
    fn capture_selection(&self) -> Option<Element>;

    /// Platform plain-text rendering of the selection
    fn selection_text(&self) -> String;
}
