//! Clipboard export configuration
//!
//! Passed in from JavaScript (every field optional) the same way layout
//! measurements are, so the host editor can match its renderer's attribute
//! naming without a rebuild.

use serde::{Deserialize, Serialize};

/// Configuration for clipboard export
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ClipboardConfig {
    /// Attribute on the exported root that carries the raw fragment encoding
    pub content_attribute: String,

    /// Attribute the renderer stamps on each block's elements
    pub offset_key_attribute: String,

    /// Suffix appended to a block key to form its first offset key
    /// (block / decorator / leaf addressing)
    pub offset_key_suffix: String,

    /// Attribute marking editor chrome that must not be exported
    pub non_editable_attribute: String,

    /// Value of `non_editable_attribute` that marks chrome
    pub non_editable_value: String,

    /// Tag used for each nesting level of the reconstructed list
    pub list_tag: String,

    /// Inline style on the exported root
    pub root_style: String,

    /// Tag of the container synthesized when a block's element is missing
    pub fallback_tag: String,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            content_attribute: "data-editor-content".to_string(),
            offset_key_attribute: "data-offset-key".to_string(),
            offset_key_suffix: "-0-0".to_string(),
            non_editable_attribute: "contenteditable".to_string(),
            non_editable_value: "false".to_string(),
            list_tag: "ul".to_string(),
            root_style: "white-space: pre-wrap;".to_string(),
            fallback_tag: "div".to_string(),
        }
    }
}

impl ClipboardConfig {
    /// Offset key the renderer uses for the first leaf of `block_key`
    pub fn offset_key_for(&self, block_key: &str) -> String {
        format!("{}{}", block_key, self.offset_key_suffix)
    }
}
