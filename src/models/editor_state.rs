//! Editor state management
//!
//! This module contains the EditorState struct: the document content, the
//! current selection and edit history. States are values; an edit produces a
//! new state via `push`, which is what the editor shell's `update` receives.

use serde::{Deserialize, Serialize};
use crate::models::content::ContentState;
use crate::models::selection::SelectionState;
use crate::undo::{ChangeType, HistoryEntry, UndoStack};

/// Complete editor state
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EditorState {
    /// The document being edited
    pub content: ContentState,

    /// Current selection (collapsed when nothing is selected)
    pub selection: SelectionState,

    /// Edit history
    #[serde(default)]
    pub undo_stack: UndoStack,

    /// Type of the most recent pushed edit
    #[serde(default)]
    pub last_change_type: Option<ChangeType>,
}

impl EditorState {
    /// Create a new editor state with the caret at the start of the first block
    pub fn new(content: ContentState) -> Self {
        let first = content.keys().next().unwrap_or_default().to_string();
        Self::with_selection(content, SelectionState::collapsed(first, 0))
    }

    /// Create a new editor state with a specific selection
    pub fn with_selection(content: ContentState, selection: SelectionState) -> Self {
        Self {
            content,
            selection,
            undo_stack: UndoStack::default(),
            last_change_type: None,
        }
    }

    /// Replace the selection without touching history
    pub fn select(mut self, selection: SelectionState) -> Self {
        self.selection = selection;
        self
    }

    /// New state with `content`, recording the current state for undo
    ///
    /// The selection carries over unchanged; callers move it with `select`.
    pub fn push(&self, content: ContentState, change_type: ChangeType) -> Self {
        let mut undo_stack = self.undo_stack.clone();
        undo_stack.push(HistoryEntry {
            change_type,
            content: self.content.clone(),
            selection: self.selection.clone(),
        });

        Self {
            content,
            selection: self.selection.clone(),
            undo_stack,
            last_change_type: Some(change_type),
        }
    }

    /// Undo the last pushed edit; `None` when history is empty
    pub fn undo(&self) -> Option<Self> {
        let mut undo_stack = self.undo_stack.clone();
        let previous = undo_stack.undo(self.snapshot())?;
        Some(Self {
            content: previous.content,
            selection: previous.selection,
            undo_stack,
            last_change_type: None,
        })
    }

    /// Redo the last undone edit; `None` when nothing was undone
    pub fn redo(&self) -> Option<Self> {
        let mut undo_stack = self.undo_stack.clone();
        let next = undo_stack.redo(self.snapshot())?;
        Some(Self {
            content: next.content,
            selection: next.selection,
            undo_stack,
            last_change_type: Some(next.change_type),
        })
    }

    fn snapshot(&self) -> HistoryEntry {
        HistoryEntry {
            change_type: self.last_change_type.unwrap_or(ChangeType::InsertCharacters),
            content: self.content.clone(),
            selection: self.selection.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::block::ContentBlock;

    fn create_test_content(text: &str) -> ContentState {
        ContentState::new(vec![ContentBlock::new("a", text), ContentBlock::new("b", "second")])
    }

    #[test]
    fn test_editor_state_new() {
        let state = EditorState::new(create_test_content("first"));

        assert_eq!(state.selection, SelectionState::collapsed("a", 0));
        assert!(!state.undo_stack.can_undo());
        assert!(state.last_change_type.is_none());
    }

    #[test]
    fn test_push_records_history() {
        let state = EditorState::new(create_test_content("first"));
        let next = state.push(create_test_content("changed"), ChangeType::RemoveRange);

        assert_eq!(next.content.blocks()[0].text, "changed");
        assert_eq!(next.last_change_type, Some(ChangeType::RemoveRange));
        assert!(next.undo_stack.can_undo());
    }

    #[test]
    fn test_push_keeps_selection_until_selected() {
        let state = EditorState::with_selection(
            create_test_content("first"),
            SelectionState::new("a", 1, "b", 3),
        );
        let next = state.push(create_test_content("fst"), ChangeType::RemoveRange);
        assert_eq!(next.selection, state.selection);

        let moved = next.select(SelectionState::collapsed("a", 1));
        assert_eq!(moved.selection, SelectionState::collapsed("a", 1));
        assert_eq!(moved.undo_stack.len(), 1);
    }

    #[test]
    fn test_undo_then_redo() {
        let state = EditorState::new(create_test_content("first"));
        let edited = state
            .push(create_test_content("changed"), ChangeType::RemoveRange)
            .select(SelectionState::collapsed("a", 2));

        let undone = edited.undo().unwrap();
        assert_eq!(undone.content.blocks()[0].text, "first");
        assert_eq!(undone.selection, SelectionState::collapsed("a", 0));

        let redone = undone.redo().unwrap();
        assert_eq!(redone.content.blocks()[0].text, "changed");
        assert_eq!(redone.selection, SelectionState::collapsed("a", 2));
        assert_eq!(redone.last_change_type, Some(ChangeType::RemoveRange));
    }

    #[test]
    fn test_undo_without_history() {
        let state = EditorState::new(create_test_content("first"));
        assert!(state.undo().is_none());
        assert!(state.redo().is_none());
    }
}
