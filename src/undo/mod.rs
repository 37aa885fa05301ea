use crate::models::content::ContentState;
use crate::models::selection::SelectionState;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Kind of edit recorded in history
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeType {
    /// A selected range was removed (cut, delete over selection)
    RemoveRange,
    /// A fragment was pasted
    InsertFragment,
    /// Typed characters
    InsertCharacters,
    /// An entity was applied or cleared
    ApplyEntity,
    /// Block data (e.g. indent) changed
    ChangeBlockData,
}

/// Snapshot taken before an edit, enough to restore it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub change_type: ChangeType,
    pub content: ContentState,
    pub selection: SelectionState,
}

/// Bounded undo/redo history of content snapshots
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UndoStack {
    /// States that can be returned to with undo
    undo: VecDeque<HistoryEntry>,
    /// States undone and available to redo
    redo: Vec<HistoryEntry>,
    /// Maximum number of undo entries kept
    max_size: usize,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(100)
    }
}

impl UndoStack {
    /// Create a new undo stack with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            max_size,
        }
    }

    /// Record the state before an edit; drops any redo history
    pub fn push(&mut self, entry: HistoryEntry) {
        self.redo.clear();
        self.undo.push_back(entry);

        // Enforce max size
        if self.undo.len() > self.max_size {
            self.undo.pop_front();
        }
    }

    /// Pop the most recent snapshot, stashing `current` for redo
    pub fn undo(&mut self, current: HistoryEntry) -> Option<HistoryEntry> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Pop the most recently undone snapshot, stashing `current` for undo
    pub fn redo(&mut self, current: HistoryEntry) -> Option<HistoryEntry> {
        let next = self.redo.pop()?;
        self.undo.push_back(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn len(&self) -> usize {
        self.undo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }
}
