//! Types representing the refract parse tree produced by an API Blueprint
//! parser

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single node in the parse tree. Every node is discriminated by its
/// `element` kind; everything else is optional and defaults to empty when
/// the parser left it out. Nodes serialize back out unchanged, so retained
/// sub-trees can ride along inside the view model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub element: String,
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub attributes: BTreeMap<String, Element>,
    #[serde(default)]
    pub content: Content,
}

/// The refract meta section. Values are themselves elements; a missing
/// entry means the producing parser had nothing to say.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Meta {
    pub classes: Option<Box<Element>>,
    pub title: Option<Box<Element>>,
    pub description: Option<Box<Element>>,
    pub id: Option<Box<Element>>,
}

/// Node content. The wire format is loosely typed: a string, an array of
/// child elements, a key/value pair (for `member` elements), a single
/// nested element, or nothing at all.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    #[default]
    Empty,
    Text(String),
    Many(Vec<Element>),
    Pair(KeyValue),
    One(Box<Element>),
    /// Anything else the producing parser emits (bare numbers,
    /// booleans). Kept verbatim but treated as empty by the accessors.
    Other(serde_json::Value),
}

/// The content of a `member` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: Box<Element>,
    pub value: Option<Box<Element>>,
}

impl Element {
    /// The node's content when it is plain text, otherwise the empty
    /// string.
    pub fn text(&self) -> &str {
        match &self.content {
            Content::Text(value) => value,
            _ => "",
        }
    }

    /// Child elements, in document order. Text and pair content have no
    /// children.
    pub fn children(&self) -> &[Element] {
        match &self.content {
            Content::Many(children) => children,
            Content::One(child) => std::slice::from_ref(child),
            _ => &[],
        }
    }

    /// The node's title from its meta section, or the empty string.
    pub fn title(&self) -> &str {
        match &self.meta.title {
            Some(title) => title.text(),
            None => "",
        }
    }

    /// The node's description from its meta section, or the empty string.
    pub fn description(&self) -> &str {
        match &self.meta.description {
            Some(description) => description.text(),
            None => "",
        }
    }

    /// An attribute by name, if present.
    pub fn attribute(&self, name: &str) -> Option<&Element> {
        self.attributes.get(name)
    }

    /// The text content of an attribute, or the empty string when the
    /// attribute is absent.
    pub fn attribute_text(&self, name: &str) -> &str {
        self.attribute(name)
            .map(|value| value.text())
            .unwrap_or("")
    }

    /// Whether the node carries the given classification tag in
    /// `meta.classes`.
    pub fn has_class(&self, class: &str) -> bool {
        match &self.meta.classes {
            Some(classes) => classes
                .children()
                .iter()
                .any(|entry| entry.text() == class),
            None => false,
        }
    }

    /// The key/value pair of a `member` element, if that is what the
    /// content holds.
    pub fn pair(&self) -> Option<&KeyValue> {
        match &self.content {
            Content::Pair(pair) => Some(pair),
            _ => None,
        }
    }
}

#[cfg(test)]
mod check {
    use super::*;

    fn parse(json: &str) -> Element {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn text_content() {
        let element = parse(r#"{"element": "string", "content": "hello"}"#);
        assert_eq!(element.element, "string");
        assert_eq!(element.text(), "hello");
        assert!(element.children().is_empty());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let element = parse(r#"{"element": "resource"}"#);
        assert_eq!(element.content, Content::Empty);
        assert_eq!(element.title(), "");
        assert_eq!(element.attribute_text("href"), "");
        assert!(!element.has_class("api"));
    }

    #[test]
    fn nested_children() {
        let element = parse(
            r#"{
                "element": "category",
                "meta": {
                    "classes": {
                        "element": "array",
                        "content": [{"element": "string", "content": "api"}]
                    },
                    "title": {"element": "string", "content": "Test API"}
                },
                "content": [{"element": "copy", "content": "Hello."}]
            }"#,
        );
        assert!(element.has_class("api"));
        assert_eq!(element.title(), "Test API");
        assert_eq!(element.children().len(), 1);
        assert_eq!(element.children()[0].text(), "Hello.");
    }

    #[test]
    fn member_pairs() {
        let element = parse(
            r#"{
                "element": "member",
                "content": {
                    "key": {"element": "string", "content": "HOST"},
                    "value": {"element": "string", "content": "https://example.com"}
                }
            }"#,
        );
        let pair = element.pair().unwrap();
        assert_eq!(pair.key.text(), "HOST");
        assert_eq!(pair.value.as_ref().unwrap().text(), "https://example.com");
    }
}
