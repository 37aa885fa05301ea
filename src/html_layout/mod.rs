//! HTML export
//!
//! This module turns an extracted fragment plus the captured rendering of the
//! live selection into clipboard HTML: block-to-element remapping, nested list
//! reconstruction and the exported root.

pub mod element;
pub mod export;
pub mod nested_list;
pub mod remap;

pub use element::{Element, Node};
pub use export::{build_export_html, wrap_export_root};
pub use nested_list::build_nested_markup;
pub use remap::{fallback_element, map_fragment_to_elements};
