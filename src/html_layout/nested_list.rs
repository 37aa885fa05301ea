//! Nested list reconstruction
//!
//! Blocks carry a flat `indent` value; nesting only exists implicitly in the
//! sequence. This is the one place that sequence is turned into list markup.
//!
//! Each block at depth > 0 becomes a list item. Between consecutive blocks the
//! depth difference ("sunk depth") opens or closes that many list levels in a
//! single step, so a jump from 0 to 3 opens three lists with no empty items in
//! between.
//!
//! Levels still open after the last block are NOT closed: a fragment ending at
//! depth 2 leaves two list tags open. Consumers of the exported markup rely on
//! the output as produced, so this is kept.
//!
//! Indents are taken as given (negative ones included) up to
//! `MAX_NESTING_DEPTH` levels either way; anything beyond is treated as that
//! limit.

use super::element::Element;
use super::remap::fallback_element;
use crate::config::ClipboardConfig;
use crate::fragment::Fragment;
use std::collections::HashMap;

/// Deepest list nesting emitted for a single indent value
pub const MAX_NESTING_DEPTH: i64 = 64;

/// Build list markup for `fragment` from its rendered elements
///
/// A block missing from `elements` is rendered as its text-only fallback.
pub fn build_nested_markup(
    fragment: &Fragment,
    elements: &HashMap<String, Element>,
    config: &ClipboardConfig,
) -> String {
    let open = format!("<{}>", config.list_tag);
    let close = format!("</{}>", config.list_tag);

    let mut markup = String::new();
    let mut last_indentation: i64 = 0;

    for block in fragment.blocks() {
        let depth = block.indent().clamp(-MAX_NESTING_DEPTH, MAX_NESTING_DEPTH);
        let mut html = match elements.get(&block.key) {
            Some(element) => element.outer_html(),
            None => fallback_element(block, config).outer_html(),
        };

        if depth > 0 {
            html = format!("<li>{}</li>", html);
        }

        let sunk = depth.saturating_sub(last_indentation);
        let structural = if sunk > 0 {
            open.repeat(sunk as usize)
        } else {
            close.repeat(sunk.unsigned_abs() as usize)
        };

        markup.push_str(&structural);
        markup.push_str(&html);
        last_indentation = depth;
    }

    markup
}
