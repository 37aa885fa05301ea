//! Selection-to-fragment extraction

use super::Fragment;
use crate::error::Result;
use crate::models::{generate_random_key, ContentState, SelectionState};
use crate::structure::remove_entities_at_edges;
use std::collections::BTreeMap;

/// Extract the selected range of `content` as a fragment
///
/// Blocks from the start block to the end block are kept in document order;
/// the first is cut to `[start_offset, ..)` and the last to `[.., end_offset)`.
/// Styles and entities travel with their characters, block type and data are
/// kept as-is, and every block gets a new key.
///
/// The caller is expected to have rejected a collapsed selection.
pub fn extract(content: &ContentState, selection: &SelectionState) -> Result<Fragment> {
    let (start_idx, end_idx) = content.selection_bounds(selection)?;
    let cleaned = remove_entities_at_edges(content, selection)?;

    let blocks: Vec<_> = cleaned.blocks()[start_idx..=end_idx]
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let position = start_idx + i;
            let from = if position == start_idx { selection.start_offset() } else { 0 };
            let to = if position == end_idx { selection.end_offset() } else { block.len() };

            let mut sliced = block.slice(from, to);
            sliced.key = generate_random_key();
            sliced
        })
        .collect();

    let entity_map: BTreeMap<_, _> = blocks
        .iter()
        .flat_map(|block| block.characters.iter())
        .filter_map(|meta| meta.entity.as_deref())
        .filter_map(|key| {
            cleaned
                .entity(key)
                .map(|entity| (key.to_string(), entity.clone()))
        })
        .collect();

    log::debug!(
        "extract: {} blocks, {} entities from {}@{} .. {}@{}",
        blocks.len(),
        entity_map.len(),
        selection.start_key(),
        selection.start_offset(),
        selection.end_key(),
        selection.end_offset()
    );

    Ok(Fragment::new(blocks, entity_map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockType, ContentBlock, Entity, Mutability};

    fn list_content() -> ContentState {
        let mut intro = ContentBlock::new("k1", "Shopping list");
        intro.apply_style(0, 8, "BOLD");
        let mut item = ContentBlock::new("k2", "milk and eggs")
            .with_type(BlockType::UnorderedListItem)
            .with_indent(1);
        item.apply_entity(9, 13, Some("link"));

        let mut content = ContentState::new(vec![
            intro,
            item,
            ContentBlock::new("k3", "bread")
                .with_type(BlockType::UnorderedListItem)
                .with_indent(2),
            ContentBlock::new("k4", "done"),
        ]);
        content.add_entity("link", Entity::new("LINK", Mutability::Mutable));
        content.add_entity("unused", Entity::new("LINK", Mutability::Mutable));
        content
    }

    #[test]
    fn test_extract_truncates_edges() {
        let content = list_content();
        let sel = SelectionState::new("k1", 9, "k3", 3);

        let fragment = extract(&content, &sel).unwrap();
        let texts: Vec<&str> = fragment.blocks().iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["list", "milk and eggs", "bre"]);
        assert_eq!(fragment.plain_text(), content.selected_text(&sel).unwrap());
    }

    #[test]
    fn test_extract_single_block() {
        let content = list_content();
        let sel = SelectionState::new("k2", 5, "k2", 8);

        let fragment = extract(&content, &sel).unwrap();
        assert_eq!(fragment.len(), 1);
        assert_eq!(fragment.blocks()[0].text, "and");
    }

    #[test]
    fn test_extract_mints_new_keys() {
        let content = list_content();
        let sel = SelectionState::new("k1", 0, "k4", 4);

        let fragment = extract(&content, &sel).unwrap();
        assert_eq!(fragment.len(), 4);
        for key in fragment.keys() {
            assert!(content.block(key).is_none(), "key {} reused", key);
        }
    }

    #[test]
    fn test_extract_preserves_metadata() {
        let content = list_content();
        let sel = SelectionState::new("k1", 4, "k3", 5);

        let fragment = extract(&content, &sel).unwrap();
        let first = &fragment.blocks()[0];
        assert!(first.characters[0].style.contains("BOLD"));
        assert!(first.characters[4].style.is_empty());

        let second = &fragment.blocks()[1];
        assert_eq!(second.block_type, BlockType::UnorderedListItem);
        assert_eq!(second.indent(), 1);
        assert_eq!(second.entity_at(9), Some("link"));
        assert_eq!(fragment.blocks()[2].indent(), 2);

        assert!(fragment.entity_map().contains_key("link"));
        assert!(!fragment.entity_map().contains_key("unused"));
    }

    #[test]
    fn test_extract_backward_selection() {
        let content = list_content();
        let mut sel = SelectionState::new("k3", 2, "k2", 9);
        sel.is_backward = true;

        let fragment = extract(&content, &sel).unwrap();
        assert_eq!(fragment.plain_text(), "eggs\nbr");
    }

    #[test]
    fn test_extract_unknown_block() {
        let content = list_content();
        let sel = SelectionState::new("k1", 0, "missing", 1);
        assert!(extract(&content, &sel).is_err());
    }
}
