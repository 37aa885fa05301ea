//! Clipboard system for copy/cut operations.
//!
//! Copy and cut extract the selected range as a fragment, keep it in the
//! session's clipboard cache for internal paste, and export it to the platform
//! clipboard as plain text and HTML. Cut additionally removes the range once
//! the native cut has run.
//!
//! ## Module Structure
//!
//! - [`cache`] - Single-slot fragment cache
//! - [`host`] - Editor shell, clipboard event and selection capture interfaces
//! - [`copy`] - Copy handling
//! - [`cut`] - Two-phase cut handling

pub mod cache;
pub mod copy;
pub mod cut;
pub mod host;


pub use cache::ClipboardCache;
pub use copy::{copy, ClipboardPayload, CopyOutcome};
pub use cut::{begin_cut, PendingCut};
pub use host::{
    ClipboardDataWriter, ClipboardEventSink, EditorHost, EditorMode, ScrollPosition,
    SelectionCapture, MIME_HTML, MIME_PLAIN_TEXT,
};
