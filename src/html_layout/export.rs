//! Exported clipboard HTML

use super::element::Element;
use super::nested_list::build_nested_markup;
use super::remap::map_fragment_to_elements;
use crate::config::ClipboardConfig;
use crate::converters::raw::serialize;
use crate::error::Result;
use crate::fragment::Fragment;
use crate::models::{ContentState, SelectionState};

/// Wrap reconstructed markup in the exported root
///
/// The root carries the raw fragment encoding in the content attribute and the
/// pre-wrap style that keeps line breaks intact in other editors.
pub fn wrap_export_root(raw: &str, markup: &str, config: &ClipboardConfig) -> String {
    format!(
        "<div {}=\"{}\" style=\"{}\">{}</div>",
        config.content_attribute,
        html_escape::encode_double_quoted_attribute(raw),
        html_escape::encode_double_quoted_attribute(&config.root_style),
        markup
    )
}

/// Full `text/html` payload for a fragment and its captured rendering
pub fn build_export_html(
    fragment: &Fragment,
    content: &ContentState,
    selection: &SelectionState,
    captured_root: &Element,
    config: &ClipboardConfig,
) -> Result<String> {
    let raw = serialize(fragment)?;
    let elements = map_fragment_to_elements(fragment, content, selection, captured_root, config)?;
    let markup = build_nested_markup(fragment, &elements, config);
    Ok(wrap_export_root(&raw, &markup, config))
}
