//! Entity cleanup at selection edges
//!
//! When a selection edge falls inside an entity's run, a non-mutable entity
//! would end up split: half copied, half left behind. Such entities are
//! stripped from their whole run in the affected block before the range is
//! sliced or removed.

use crate::error::Result;
use crate::models::{ContentState, Mutability, SelectionState};

/// Copy of `content` with broken non-mutable entities cleared at both edges
pub fn remove_entities_at_edges(
    content: &ContentState,
    selection: &SelectionState,
) -> Result<ContentState> {
    content.selection_bounds(selection)?;

    let mut updated = content.clone();
    strip_at(&mut updated, selection.start_key(), selection.start_offset());
    strip_at(&mut updated, selection.end_key(), selection.end_offset());
    Ok(updated)
}

fn strip_at(content: &mut ContentState, block_key: &str, offset: usize) {
    let entity_key = {
        let Some(block) = content.block(block_key) else {
            return;
        };
        if offset == 0 {
            return;
        }
        match (block.entity_at(offset - 1), block.entity_at(offset)) {
            (Some(before), Some(after)) if before == after => after.to_string(),
            _ => return,
        }
    };

    let mutable = content
        .entity(&entity_key)
        .map_or(true, |entity| entity.mutability == Mutability::Mutable);
    if mutable {
        return;
    }

    if let Some(block) = content.block_mut(block_key) {
        let (start, end) = block.entity_run_at(&entity_key, offset);
        log::debug!(
            "stripping entity {} from {}..{} in block {}",
            entity_key,
            start,
            end,
            block_key
        );
        block.apply_entity(start, end, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentBlock, Entity};

    fn content_with(mutability: Mutability) -> ContentState {
        let mut block = ContentBlock::new("a", "go to example now");
        block.apply_entity(6, 13, Some("e1"));
        let mut content = ContentState::new(vec![block, ContentBlock::new("b", "tail")]);
        content.add_entity("e1", Entity::new("LINK", mutability));
        content
    }

    #[test]
    fn test_immutable_entity_split_by_start_is_removed() {
        let content = content_with(Mutability::Immutable);
        let sel = SelectionState::new("a", 9, "b", 2);

        let cleaned = remove_entities_at_edges(&content, &sel).unwrap();
        let block = cleaned.block("a").unwrap();
        assert!((0..block.len()).all(|i| block.entity_at(i).is_none()));
    }

    #[test]
    fn test_segmented_entity_split_is_removed() {
        let content = content_with(Mutability::Segmented);
        let sel = SelectionState::new("a", 0, "a", 8);

        let cleaned = remove_entities_at_edges(&content, &sel).unwrap();
        assert_eq!(cleaned.block("a").unwrap().entity_at(6), None);
    }

    #[test]
    fn test_mutable_entity_is_kept() {
        let content = content_with(Mutability::Mutable);
        let sel = SelectionState::new("a", 9, "b", 2);

        let cleaned = remove_entities_at_edges(&content, &sel).unwrap();
        assert_eq!(cleaned.block("a").unwrap().entity_at(9), Some("e1"));
    }

    #[test]
    fn test_edge_on_entity_boundary_keeps_entity() {
        let content = content_with(Mutability::Immutable);
        let sel = SelectionState::new("a", 6, "a", 13);

        let cleaned = remove_entities_at_edges(&content, &sel).unwrap();
        assert_eq!(cleaned.block("a").unwrap().entity_at(6), Some("e1"));
        assert_eq!(cleaned.block("a").unwrap().entity_at(12), Some("e1"));
    }
}
