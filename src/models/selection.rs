//! Selection state over block keys
//!
//! Anchor is where the selection started, focus where it ends; a selection made
//! right-to-left is backward. Offsets count `char`s within a block.

use serde::{Deserialize, Serialize};

/// A selection range in block-key space
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub anchor_key: String,
    pub anchor_offset: usize,
    pub focus_key: String,
    pub focus_offset: usize,
    #[serde(default)]
    pub is_backward: bool,
    #[serde(default)]
    pub has_focus: bool,
}

impl SelectionState {
    /// Forward selection from (start_key, start_offset) to (end_key, end_offset)
    pub fn new(
        start_key: impl Into<String>,
        start_offset: usize,
        end_key: impl Into<String>,
        end_offset: usize,
    ) -> Self {
        Self {
            anchor_key: start_key.into(),
            anchor_offset: start_offset,
            focus_key: end_key.into(),
            focus_offset: end_offset,
            is_backward: false,
            has_focus: true,
        }
    }

    /// Collapsed selection (caret) at a position
    pub fn collapsed(key: impl Into<String>, offset: usize) -> Self {
        let key = key.into();
        Self::new(key.clone(), offset, key, offset)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor_key == self.focus_key && self.anchor_offset == self.focus_offset
    }

    pub fn start_key(&self) -> &str {
        if self.is_backward { &self.focus_key } else { &self.anchor_key }
    }

    pub fn start_offset(&self) -> usize {
        if self.is_backward { self.focus_offset } else { self.anchor_offset }
    }

    pub fn end_key(&self) -> &str {
        if self.is_backward { &self.anchor_key } else { &self.focus_key }
    }

    pub fn end_offset(&self) -> usize {
        if self.is_backward { self.anchor_offset } else { self.focus_offset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backward_selection_normalizes() {
        let mut sel = SelectionState::new("b", 4, "a", 1);
        sel.is_backward = true;

        assert_eq!(sel.start_key(), "a");
        assert_eq!(sel.start_offset(), 1);
        assert_eq!(sel.end_key(), "b");
        assert_eq!(sel.end_offset(), 4);
    }

    #[test]
    fn test_collapsed() {
        assert!(SelectionState::collapsed("a", 3).is_collapsed());
        assert!(!SelectionState::new("a", 0, "a", 1).is_collapsed());
        assert!(!SelectionState::new("a", 0, "b", 0).is_collapsed());
    }
}
