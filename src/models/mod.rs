//! Models module for the rich text editor
//!
//! This module contains the document model consumed by clipboard export:
//! blocks with per-character metadata, entities, selections and editor state.

pub mod block;
pub mod content;
pub mod editor_state;
pub mod entity;
pub mod keys;
pub mod selection;

// Re-export commonly used types
pub use block::{BlockType, CharacterMetadata, ContentBlock, INDENT_KEY};
pub use content::ContentState;
pub use editor_state::EditorState;
pub use entity::{Entity, Mutability};
pub use keys::generate_random_key;
pub use selection::SelectionState;
