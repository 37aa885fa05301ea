//! Browser capture test
//!
//! Renders blocks into the page, selects them and checks the detached tree the
//! DOM capture produces.

#![cfg(target_arch = "wasm32")]

use editor_clipboard_wasm::api::browser::DomSelectionCapture;
use editor_clipboard_wasm::clipboard::SelectionCapture;
use editor_clipboard_wasm::ClipboardConfig;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn render(html: &str) -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let editor = document.create_element("div").unwrap();
    editor.set_inner_html(html);
    document.body().unwrap().append_child(&editor).unwrap();

    let range = document.create_range().unwrap();
    range.select_node_contents(&editor).unwrap();
    let selection = web_sys::window().unwrap().get_selection().unwrap().unwrap();
    selection.remove_all_ranges().unwrap();
    selection.add_range(&range).unwrap();
    editor
}

#[wasm_bindgen_test]
fn test_capture_converts_selected_blocks() {
    let editor = render(
        "<div data-offset-key=\"a-0-0\"><span>One</span></div>\
         <span contenteditable=\"false\">•</span>\
         <div data-offset-key=\"b-0-0\"><b>Two</b></div>",
    );

    let capture = DomSelectionCapture::new();
    let mut root = capture.capture_selection().expect("selection should be captured");
    root.strip_non_editable(&ClipboardConfig::default());

    let first = root.find_by_attribute("data-offset-key", "a-0-0").unwrap();
    assert_eq!(first.outer_html(), "<div data-offset-key=\"a-0-0\"><span>One</span></div>");
    let second = root.find_by_attribute("data-offset-key", "b-0-0").unwrap();
    assert_eq!(second.inner_html(), "<b>Two</b>");
    assert!(!root.text_content().contains('•'));

    editor.remove();
}

#[wasm_bindgen_test]
fn test_capture_without_selection() {
    let selection = web_sys::window().unwrap().get_selection().unwrap().unwrap();
    selection.remove_all_ranges().unwrap();

    let capture = DomSelectionCapture::new();
    assert!(capture.capture_selection().is_none());
    assert_eq!(capture.selection_text(), "");
}
