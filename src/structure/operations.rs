//! Structural operations on document content
//!
//! Range removal is the only structural edit clipboard export needs: cut
//! removes the selected range once the native cut has run.

use super::entities::remove_entities_at_edges;
use crate::error::Result;
use crate::models::{ContentBlock, ContentState, Mutability, SelectionState};

/// Which side of a segmented entity absorbs the adjoining whitespace
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovalDirection {
    Forward,
    Backward,
}

/// Result of removing a range
#[derive(Clone, Debug, PartialEq)]
pub struct RemovedRange {
    pub content: ContentState,
    /// Caret where the removed range started
    pub selection_after: SelectionState,
}

/// Remove the selected range from `content`
///
/// The start block keeps its key, type and data and absorbs the end block's
/// tail; blocks in between are dropped. A range inside a single non-mutable
/// entity grows to what that entity allows removing.
pub fn remove_range(
    content: &ContentState,
    selection: &SelectionState,
    direction: RemovalDirection,
) -> Result<RemovedRange> {
    let (start_idx, end_idx) = content.selection_bounds(selection)?;

    if selection.is_collapsed() {
        return Ok(RemovedRange {
            content: content.clone(),
            selection_after: selection.clone(),
        });
    }

    let range = expand_for_entity(content, selection, direction);
    let cleaned = remove_entities_at_edges(content, &range)?;

    let start_block = &cleaned.blocks()[start_idx];
    let end_block = &cleaned.blocks()[end_idx];
    let head = start_block.slice(0, range.start_offset());
    let tail = end_block.slice(range.end_offset(), end_block.len());

    let mut merged = ContentBlock {
        text: head.text,
        characters: head.characters,
        ..start_block.clone()
    };
    merged.text.push_str(&tail.text);
    merged.characters.extend(tail.characters);

    log::debug!(
        "remove_range: {}@{} .. {}@{} ({} blocks merged)",
        range.start_key(),
        range.start_offset(),
        range.end_key(),
        range.end_offset(),
        end_idx - start_idx + 1
    );

    let mut updated = cleaned.clone();
    updated.splice_blocks(start_idx, end_idx, vec![merged]);

    Ok(RemovedRange {
        content: updated,
        selection_after: SelectionState::collapsed(range.start_key(), range.start_offset()),
    })
}

/// Grow a single-block range that sits inside one non-mutable entity
fn expand_for_entity(
    content: &ContentState,
    selection: &SelectionState,
    direction: RemovalDirection,
) -> SelectionState {
    let forward = SelectionState::new(
        selection.start_key(),
        selection.start_offset(),
        selection.end_key(),
        selection.end_offset(),
    );
    if selection.start_key() != selection.end_key() {
        return forward;
    }
    let Some(block) = content.block(selection.start_key()) else {
        return forward;
    };

    let (start, end) = (selection.start_offset(), selection.end_offset());
    let entity_key = match (block.entity_at(start), block.entity_at(end.saturating_sub(1))) {
        (Some(first), Some(last)) if first == last => first,
        _ => return forward,
    };
    let Some(entity) = content.entity(entity_key) else {
        return forward;
    };

    let (run_start, run_end) = block.entity_run_at(entity_key, start);
    if end > run_end {
        return forward;
    }

    let (new_start, new_end) = match entity.mutability {
        Mutability::Mutable => return forward,
        Mutability::Immutable => (run_start, run_end),
        Mutability::Segmented => segment_range(block, run_start, run_end, start, end, direction),
    };

    SelectionState::new(block.key.clone(), new_start, block.key.clone(), new_end)
}

/// Whitespace-delimited segments of `[run_start, run_end)` touched by
/// `[start, end)`, plus one adjoining space on the `direction` side
fn segment_range(
    block: &ContentBlock,
    run_start: usize,
    run_end: usize,
    start: usize,
    end: usize,
    direction: RemovalDirection,
) -> (usize, usize) {
    let chars: Vec<char> = block.text.chars().collect();
    let is_space = |i: usize| chars.get(i).is_some_and(|c| c.is_whitespace());

    let mut new_start = start;
    while new_start > run_start && !is_space(new_start - 1) {
        new_start -= 1;
    }
    let mut new_end = end;
    while new_end < run_end && !is_space(new_end) {
        new_end += 1;
    }

    match direction {
        RemovalDirection::Forward if new_end < run_end && is_space(new_end) => new_end += 1,
        RemovalDirection::Backward if new_start > run_start && is_space(new_start - 1) => {
            new_start -= 1
        }
        _ => {}
    }
    (new_start, new_end)
}
