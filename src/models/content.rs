//! Document content: an ordered block map plus the entities it references
//!
//! Block order is document order. Keys are unique; lookups go through a
//! key → position index kept in step with the block list.

use super::block::ContentBlock;
use super::entity::Entity;
use super::selection::SelectionState;
use crate::error::{ClipboardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Document content (WASM-owned source of truth)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(from = "ContentParts", into = "ContentParts")]
pub struct ContentState {
    blocks: Vec<ContentBlock>,
    index: HashMap<String, usize>,
    entity_map: BTreeMap<String, Entity>,
}

/// Serialized shape of `ContentState` (the index is rebuilt on load)
#[derive(Serialize, Deserialize)]
struct ContentParts {
    blocks: Vec<ContentBlock>,
    #[serde(default, rename = "entityMap")]
    entity_map: BTreeMap<String, Entity>,
}

impl From<ContentParts> for ContentState {
    fn from(parts: ContentParts) -> Self {
        ContentState::with_entities(parts.blocks, parts.entity_map)
    }
}

impl From<ContentState> for ContentParts {
    fn from(content: ContentState) -> Self {
        ContentParts {
            blocks: content.blocks,
            entity_map: content.entity_map,
        }
    }
}

impl ContentState {
    pub fn new(blocks: Vec<ContentBlock>) -> Self {
        Self::with_entities(blocks, BTreeMap::new())
    }

    pub fn with_entities(blocks: Vec<ContentBlock>, entity_map: BTreeMap<String, Entity>) -> Self {
        let index = blocks
            .iter()
            .enumerate()
            .map(|(i, block)| (block.key.clone(), i))
            .collect();
        Self {
            blocks,
            index,
            entity_map,
        }
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    /// Block keys in document order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|block| block.key.as_str())
    }

    pub fn block(&self, key: &str) -> Option<&ContentBlock> {
        self.index.get(key).map(|&i| &self.blocks[i])
    }

    /// Position of `key` in document order
    pub fn position(&self, key: &str) -> Result<usize> {
        self.index
            .get(key)
            .copied()
            .ok_or_else(|| ClipboardError::UnknownBlock(key.to_string()))
    }

    pub fn entity_map(&self) -> &BTreeMap<String, Entity> {
        &self.entity_map
    }

    pub fn entity(&self, key: &str) -> Option<&Entity> {
        self.entity_map.get(key)
    }

    /// Register an entity under `key`, replacing any previous one
    pub fn add_entity(&mut self, key: impl Into<String>, entity: Entity) {
        self.entity_map.insert(key.into(), entity);
    }

    /// Document positions of the selection's start and end blocks
    ///
    /// Fails when either key is unknown or when start comes after end.
    pub fn selection_bounds(&self, selection: &SelectionState) -> Result<(usize, usize)> {
        let start = self.position(selection.start_key())?;
        let end = self.position(selection.end_key())?;
        if start > end {
            return Err(ClipboardError::InvalidSelection(format!(
                "start block {} comes after end block {}",
                selection.start_key(),
                selection.end_key()
            )));
        }
        if start == end && selection.start_offset() > selection.end_offset() {
            return Err(ClipboardError::InvalidSelection(format!(
                "start offset {} > end offset {} in block {}",
                selection.start_offset(),
                selection.end_offset(),
                selection.start_key()
            )));
        }
        Ok((start, end))
    }

    /// Keys from the selection's start block to its end block, inclusive
    pub fn keys_in_selection(&self, selection: &SelectionState) -> Result<Vec<String>> {
        let (start, end) = self.selection_bounds(selection)?;
        Ok(self.blocks[start..=end]
            .iter()
            .map(|block| block.key.clone())
            .collect())
    }

    /// Plain-text rendering of the selection, blocks joined with `\n`
    pub fn selected_text(&self, selection: &SelectionState) -> Result<String> {
        let (start, end) = self.selection_bounds(selection)?;
        let parts: Vec<String> = (start..=end)
            .map(|i| {
                let block = &self.blocks[i];
                let from = if i == start { selection.start_offset() } else { 0 };
                let to = if i == end { selection.end_offset() } else { block.len() };
                block.slice(from, to).text
            })
            .collect();
        Ok(parts.join("\n"))
    }

    /// Mutable access to one block, for in-crate structural edits
    pub(crate) fn block_mut(&mut self, key: &str) -> Option<&mut ContentBlock> {
        match self.index.get(key) {
            Some(&i) => Some(&mut self.blocks[i]),
            None => None,
        }
    }

    /// Replace blocks `[start, end]` with `replacement`, rebuilding the index
    pub(crate) fn splice_blocks(
        &mut self,
        start: usize,
        end: usize,
        replacement: Vec<ContentBlock>,
    ) {
        self.blocks.splice(start..=end, replacement);
        self.index = self
            .blocks
            .iter()
            .enumerate()
            .map(|(i, block)| (block.key.clone(), i))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ContentState {
        ContentState::new(vec![
            ContentBlock::new("a", "alpha"),
            ContentBlock::new("b", "beta"),
            ContentBlock::new("c", "gamma"),
        ])
    }

    #[test]
    fn test_keys_in_selection_inclusive() {
        let content = sample();
        let sel = SelectionState::new("a", 2, "c", 1);
        assert_eq!(content.keys_in_selection(&sel).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_selected_text_spans_blocks() {
        let content = sample();
        let sel = SelectionState::new("a", 2, "c", 3);
        assert_eq!(content.selected_text(&sel).unwrap(), "pha\nbeta\ngam");
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let content = sample();
        let sel = SelectionState::new("a", 0, "zz", 1);
        assert!(matches!(
            content.selected_text(&sel),
            Err(ClipboardError::UnknownBlock(key)) if key == "zz"
        ));
    }

    #[test]
    fn test_out_of_order_selection_is_an_error() {
        let content = sample();
        let sel = SelectionState::new("c", 0, "a", 1);
        assert!(matches!(
            content.keys_in_selection(&sel),
            Err(ClipboardError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_serde_rebuilds_index() {
        let json = serde_json::to_string(&sample()).unwrap();
        let restored: ContentState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.position("c").unwrap(), 2);
        assert_eq!(restored, sample());
    }
}
