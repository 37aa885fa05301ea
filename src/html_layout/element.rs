//! Detached DOM tree
//!
//! Captured selection markup is converted into this tree once, at the browser
//! boundary. Everything after that (chrome stripping, block lookup, markup
//! serialization) works on plain Rust values and can be tested without a DOM.

use crate::config::ClipboardConfig;
use serde::{Deserialize, Serialize};

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// A DOM node
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// A DOM element with ordered attributes
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder-style child element
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Builder-style text child
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// First element (self included, depth-first pre-order) with `name == value`
    pub fn find_by_attribute(&self, name: &str, value: &str) -> Option<&Element> {
        if self.attribute(name) == Some(value) {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            Node::Element(element) => element.find_by_attribute(name, value),
            Node::Text(_) => None,
        })
    }

    /// Remove every descendant marked as non-editable chrome
    pub fn strip_non_editable(&mut self, config: &ClipboardConfig) {
        self.children.retain(|child| match child {
            Node::Element(element) => {
                element.attribute(&config.non_editable_attribute)
                    != Some(config.non_editable_value.as_str())
            }
            Node::Text(_) => true,
        });
        for child in &mut self.children {
            if let Node::Element(element) = child {
                element.strip_non_editable(config);
            }
        }
    }

    /// Concatenated text of all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Element(element) => element.collect_text(out),
                Node::Text(text) => out.push_str(text),
            }
        }
    }

    /// Serialized markup of this element and its subtree
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Serialized markup of the children only
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write_html(&mut out);
        }
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&html_escape::encode_double_quoted_attribute(value));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

impl Node {
    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.write_html(out),
            Node::Text(text) => out.push_str(&html_escape::encode_text(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered_block() -> Element {
        Element::new("DIV")
            .with_attribute("data-offset-key", "abc-0-0")
            .with_child(
                Element::new("span")
                    .with_attribute("style", "font-weight: bold")
                    .with_text("Tom & \"Jerry\""),
            )
            .with_child(Element::new("br"))
    }

    #[test]
    fn test_outer_html_escapes() {
        assert_eq!(
            rendered_block().outer_html(),
            "<div data-offset-key=\"abc-0-0\"><span style=\"font-weight: bold\">Tom &amp; \"Jerry\"</span><br></div>"
        );
    }

    #[test]
    fn test_attribute_values_escaped() {
        let el = Element::new("p").with_attribute("title", "a \"quoted\" & more");
        assert_eq!(el.outer_html(), "<p title=\"a &quot;quoted&quot; &amp; more\"></p>");
    }

    #[test]
    fn test_find_by_attribute_depth_first() {
        let root = Element::new("div")
            .with_child(Element::new("p").with_child(
                Element::new("span").with_attribute("data-offset-key", "k-0-0").with_text("deep"),
            ))
            .with_child(
                Element::new("span")
                    .with_attribute("data-offset-key", "k-0-0")
                    .with_text("shallow"),
            );

        let found = root.find_by_attribute("data-offset-key", "k-0-0").unwrap();
        assert_eq!(found.text_content(), "deep");
        assert!(root.find_by_attribute("data-offset-key", "zz-0-0").is_none());
    }

    #[test]
    fn test_strip_non_editable() {
        let config = ClipboardConfig::default();
        let mut root = Element::new("div").with_child(
            Element::new("div")
                .with_child(
                    Element::new("span")
                        .with_attribute("contenteditable", "false")
                        .with_text("⠿"),
                )
                .with_text("content"),
        );
        root.strip_non_editable(&config);

        assert_eq!(root.text_content(), "content");
        assert_eq!(root.outer_html(), "<div><div>content</div></div>");
    }

    #[test]
    fn test_set_attribute_replaces() {
        let mut el = Element::new("div").with_attribute("class", "a");
        el.set_attribute("class", "b");
        assert_eq!(el.attributes, vec![("class".to_string(), "b".to_string())]);
    }
}
