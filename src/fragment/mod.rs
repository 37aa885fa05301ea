//! Fragments: the selected part of a document, detached from it
//!
//! A fragment has the same shape as document content (ordered blocks plus the
//! entities they reference) but its block keys are freshly minted, so it can
//! be pasted back into the document it came from.

pub mod extract;

pub use extract::extract;

use crate::models::{ContentBlock, Entity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An extracted selection
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Fragment {
    blocks: Vec<ContentBlock>,
    #[serde(rename = "entityMap")]
    entity_map: BTreeMap<String, Entity>,
}

impl Fragment {
    pub fn new(blocks: Vec<ContentBlock>, entity_map: BTreeMap<String, Entity>) -> Self {
        Self { blocks, entity_map }
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    /// Block keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|block| block.key.as_str())
    }

    pub fn block(&self, key: &str) -> Option<&ContentBlock> {
        self.blocks.iter().find(|block| block.key == key)
    }

    pub fn entity_map(&self) -> &BTreeMap<String, Entity> {
        &self.entity_map
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Block texts joined with `\n`
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
