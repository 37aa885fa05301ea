//! Fragment block → rendered element mapping
//!
//! The captured DOM was rendered under the live document's block keys, while
//! the fragment carries freshly minted keys. The two key sequences are walked
//! in lock-step: the i-th live key in the selection corresponds to the i-th
//! fragment key.

use super::element::Element;
use crate::config::ClipboardConfig;
use crate::error::Result;
use crate::fragment::Fragment;
use crate::models::{ContentBlock, ContentState, SelectionState};
use std::collections::HashMap;

/// Map each fragment block key to the element that renders it
///
/// Fragment blocks with no rendered counterpart (element missing from the
/// capture, or no live key at that position) get a synthesized container
/// holding the block's raw text.
pub fn map_fragment_to_elements(
    fragment: &Fragment,
    content: &ContentState,
    selection: &SelectionState,
    captured_root: &Element,
    config: &ClipboardConfig,
) -> Result<HashMap<String, Element>> {
    let live_keys = content.keys_in_selection(selection)?;
    if live_keys.len() != fragment.len() {
        log::warn!(
            "remap: {} live blocks vs {} fragment blocks; unmatched blocks fall back to text",
            live_keys.len(),
            fragment.len()
        );
    }

    let mut elements = HashMap::with_capacity(fragment.len());
    for (i, block) in fragment.blocks().iter().enumerate() {
        let rendered = live_keys.get(i).and_then(|live_key| {
            captured_root.find_by_attribute(
                &config.offset_key_attribute,
                &config.offset_key_for(live_key),
            )
        });

        let element = match rendered {
            Some(element) => element.clone(),
            None => {
                log::debug!("remap: no rendered element for fragment block {}", block.key);
                fallback_element(block, config)
            }
        };
        elements.insert(block.key.clone(), element);
    }

    Ok(elements)
}

/// Text-only container standing in for a block that was not captured
pub fn fallback_element(block: &ContentBlock, config: &ClipboardConfig) -> Element {
    Element::new(config.fallback_tag.as_str()).with_text(block.text.as_str())
}
