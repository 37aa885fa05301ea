//! Browser adapters for the clipboard collaborators
//!
//! Wraps the live `ClipboardEvent`, its `DataTransfer` and the window
//! selection so the copy/cut orchestration can run against the real DOM. The
//! captured selection is converted into the detached [`Element`] tree here and
//! nowhere else.

use crate::clipboard::{ClipboardDataWriter, ClipboardEventSink, SelectionCapture};
use crate::error::{ClipboardError, Result};
use crate::html_layout::{Element, Node};
use crate::wasm_warn;
use wasm_bindgen::JsCast;

/// `DataTransfer` of a clipboard event
pub struct DataTransferWriter(web_sys::DataTransfer);

impl ClipboardDataWriter for DataTransferWriter {
    fn set_data(&mut self, format: &str, data: &str) -> Result<()> {
        self.0
            .set_data(format, data)
            .map_err(|e| ClipboardError::ClipboardWrite {
                format: format.to_string(),
                reason: format!("{:?}", e),
            })
    }
}

/// A native copy or cut event
pub struct BrowserClipboardEvent {
    event: web_sys::ClipboardEvent,
    data: Option<DataTransferWriter>,
}

impl BrowserClipboardEvent {
    pub fn new(event: web_sys::ClipboardEvent) -> Self {
        let data = event.clipboard_data().map(DataTransferWriter);
        Self { event, data }
    }
}

impl ClipboardEventSink for BrowserClipboardEvent {
    fn prevent_default(&mut self) {
        self.event.prevent_default();
    }

    fn clipboard_data(&mut self) -> Option<&mut dyn ClipboardDataWriter> {
        self.data.as_mut().map(|d| d as &mut dyn ClipboardDataWriter)
    }
}

/// Capture of `window.getSelection()`
pub struct DomSelectionCapture {
    window: Option<web_sys::Window>,
}

impl DomSelectionCapture {
    pub fn new() -> Self {
        Self {
            window: web_sys::window(),
        }
    }

    fn selection(&self) -> Option<web_sys::Selection> {
        self.window.as_ref()?.get_selection().ok().flatten()
    }
}

impl Default for DomSelectionCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionCapture for DomSelectionCapture {
    fn capture_selection(&self) -> Option<Element> {
        let selection = self.selection()?;
        if selection.range_count() == 0 {
            wasm_warn!("capture: selection has no ranges");
            return None;
        }

        let contents = selection
            .get_range_at(0)
            .and_then(|range| range.clone_contents())
            .map_err(|e| wasm_warn!("capture: could not clone selected range: {:?}", e))
            .ok()?;

        let mut root = Element::new("div");
        root.children = convert_children(contents.as_ref());
        Some(root)
    }

    fn selection_text(&self) -> String {
        self.selection()
            .map(|selection| String::from(selection.to_string()))
            .unwrap_or_default()
    }
}

/// Convert a DOM element (and its subtree) into a detached element
pub fn convert_element(element: &web_sys::Element) -> Element {
    let mut converted = Element::new(element.tag_name());
    for name in element.get_attribute_names().iter() {
        if let Some(name) = name.as_string() {
            if let Some(value) = element.get_attribute(&name) {
                converted.set_attribute(name, value);
            }
        }
    }
    converted.children = convert_children(element.as_ref());
    converted
}

fn convert_children(parent: &web_sys::Node) -> Vec<Node> {
    let nodes = parent.child_nodes();
    let mut children = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else { continue };
        match node.node_type() {
            web_sys::Node::ELEMENT_NODE => {
                if let Some(element) = node.dyn_ref::<web_sys::Element>() {
                    children.push(Node::Element(convert_element(element)));
                }
            }
            web_sys::Node::TEXT_NODE => {
                children.push(Node::Text(node.text_content().unwrap_or_default()));
            }
            _ => {}
        }
    }
    children
}
