//! Content blocks
//!
//! A block is one structural unit of the document (a paragraph, list item,
//! heading...). Text is stored with one `CharacterMetadata` per `char`, so a
//! slice of the text slices its styles and entities with it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Key in a block's data map holding its nesting depth
pub const INDENT_KEY: &str = "indent";

/// Block type tag
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    #[default]
    Unstyled,
    Paragraph,
    HeaderOne,
    HeaderTwo,
    HeaderThree,
    HeaderFour,
    HeaderFive,
    HeaderSix,
    UnorderedListItem,
    OrderedListItem,
    Blockquote,
    CodeBlock,
    Atomic,
}

/// Inline styles and entity applied to a single character
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct CharacterMetadata {
    #[serde(default)]
    pub style: BTreeSet<String>,

    #[serde(default)]
    pub entity: Option<String>,
}

impl CharacterMetadata {
    pub fn with_style(style: &str) -> Self {
        let mut meta = Self::default();
        meta.style.insert(style.to_string());
        meta
    }

    pub fn with_entity(entity: &str) -> Self {
        Self {
            style: BTreeSet::new(),
            entity: Some(entity.to_string()),
        }
    }
}

/// One block of content
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ContentBlock {
    pub key: String,

    #[serde(rename = "type", default)]
    pub block_type: BlockType,

    pub text: String,

    /// Parallel to `text.chars()`
    pub characters: Vec<CharacterMetadata>,

    /// Free-form block data; `indent` lives here
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl ContentBlock {
    /// Create an unstyled block with plain characters
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let characters = vec![CharacterMetadata::default(); text.chars().count()];
        Self {
            key: key.into(),
            block_type: BlockType::Unstyled,
            text,
            characters,
            data: Map::new(),
        }
    }

    /// Builder-style block type setter
    pub fn with_type(mut self, block_type: BlockType) -> Self {
        self.block_type = block_type;
        self
    }

    /// Builder-style indent setter
    pub fn with_indent(mut self, indent: i64) -> Self {
        self.set_indent(indent);
        self
    }

    /// Nesting depth from `data.indent`; 0 when absent or not an integer
    pub fn indent(&self) -> i64 {
        self.data
            .get(INDENT_KEY)
            .and_then(Value::as_i64)
            .unwrap_or(0)
    }

    pub fn set_indent(&mut self, indent: i64) {
        self.data.insert(INDENT_KEY.to_string(), Value::from(indent));
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Apply an inline style to `[start, end)`
    pub fn apply_style(&mut self, start: usize, end: usize, style: &str) {
        let end = end.min(self.characters.len());
        for meta in self.characters.iter_mut().take(end).skip(start) {
            meta.style.insert(style.to_string());
        }
    }

    /// Apply (or clear, with `None`) an entity on `[start, end)`
    pub fn apply_entity(&mut self, start: usize, end: usize, entity: Option<&str>) {
        let end = end.min(self.characters.len());
        for meta in self.characters.iter_mut().take(end).skip(start) {
            meta.entity = entity.map(str::to_string);
        }
    }

    /// Entity on the character at `offset`
    pub fn entity_at(&self, offset: usize) -> Option<&str> {
        self.characters
            .get(offset)
            .and_then(|meta| meta.entity.as_deref())
    }

    /// Copy of `[start, end)` with text and metadata sliced together
    ///
    /// Bounds are clamped to the block; `start > end` yields an empty slice.
    pub fn slice(&self, start: usize, end: usize) -> ContentBlock {
        let end = end.min(self.characters.len());
        let start = start.min(end);
        ContentBlock {
            key: self.key.clone(),
            block_type: self.block_type,
            text: self.text.chars().skip(start).take(end - start).collect(),
            characters: self.characters[start..end].to_vec(),
            data: self.data.clone(),
        }
    }

    /// Contiguous run `[start, end)` of `entity` that contains `offset`
    pub fn entity_run_at(&self, entity: &str, offset: usize) -> (usize, usize) {
        let is_entity = |i: usize| self.entity_at(i) == Some(entity);

        let mut start = offset;
        while start > 0 && is_entity(start - 1) {
            start -= 1;
        }
        let mut end = offset;
        while end < self.characters.len() && is_entity(end) {
            end += 1;
        }
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_defaults_to_zero() {
        let block = ContentBlock::new("a", "text");
        assert_eq!(block.indent(), 0);

        let mut odd = ContentBlock::new("b", "text");
        odd.data.insert(INDENT_KEY.to_string(), Value::from("two"));
        assert_eq!(odd.indent(), 0);

        assert_eq!(ContentBlock::new("c", "x").with_indent(3).indent(), 3);
    }

    #[test]
    fn test_slice_keeps_metadata_aligned() {
        let mut block = ContentBlock::new("a", "héllo world").with_indent(2);
        block.apply_style(0, 5, "BOLD");

        let sliced = block.slice(3, 8);
        assert_eq!(sliced.text, "lo wo");
        assert_eq!(sliced.characters.len(), 5);
        assert!(sliced.characters[0].style.contains("BOLD"));
        assert!(sliced.characters[1].style.contains("BOLD"));
        assert!(sliced.characters[2].style.is_empty());
        assert_eq!(sliced.indent(), 2);
    }

    #[test]
    fn test_slice_clamps_bounds() {
        let block = ContentBlock::new("a", "abc");
        assert_eq!(block.slice(1, 99).text, "bc");
        assert_eq!(block.slice(5, 2).text, "");
    }

    #[test]
    fn test_entity_run_at() {
        let mut block = ContentBlock::new("a", "see the link here");
        block.apply_entity(4, 12, Some("1"));

        assert_eq!(block.entity_run_at("1", 6), (4, 12));
        assert_eq!(block.entity_at(3), None);
        assert_eq!(block.entity_at(11), Some("1"));
    }
}
