//! The tagged document tree.
//!
//! A document is a single root [`Node`]. Every node carries a tag name, a set
//! of attributes and an ordered list of children, each of which is either a
//! nested node or a text leaf. Passes over the tree consume it and build a new
//! one rather than mutating in place.
//!
//! In JSON a text leaf is a bare string and a node is an object:
//!
//! ```json
//! {"tag": "p", "children": ["Hello ", {"tag": "em", "children": ["world"]}]}
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attribute map. Keys are unique; order carries no meaning.
pub type Attrs = BTreeMap<String, String>;

/// A tagged tree element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Tag name.
    pub tag: String,

    /// Attributes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: Attrs,

    /// Ordered children.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Child>,
}

/// A child of a [`Node`]: either a nested node or a text leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Child {
    /// Text leaf.
    Text(String),
    /// Nested node.
    Node(Node),
}

impl Node {
    /// Create an empty node with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Attrs::new(),
            children: Vec::new(),
        }
    }

    /// Builder: set an attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder: append a child.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Builder: append several children.
    #[must_use]
    pub fn with_children<I, C>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Child>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Whether the node has the given tag.
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Get an attribute value.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Whether the whitespace-separated `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Add a class to the `class` attribute unless already present.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let value = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_string(),
        };
        self.set_attr("class", value);
    }

    /// Concatenated text of every descendant text leaf, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Visit this node and every descendant node, depth-first pre-order.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for child in &self.children {
            if let Child::Node(node) = child {
                node.visit(f);
            }
        }
    }

    /// Whether this node or any descendant has the given tag.
    pub fn contains_tag(&self, tag: &str) -> bool {
        let mut found = false;
        self.visit(&mut |n| found |= n.is(tag));
        found
    }
}

fn collect_text(children: &[Child], out: &mut String) {
    for child in children {
        match child {
            Child::Text(text) => out.push_str(text),
            Child::Node(node) => collect_text(&node.children, out),
        }
    }
}

impl Child {
    /// Borrow as a node, if this is one.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            Self::Text(_) => None,
        }
    }

    /// Borrow as text, if this is a text leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Node(_) => None,
        }
    }

    /// Whether this is a node with the given tag.
    pub fn is_tag(&self, tag: &str) -> bool {
        self.as_node().is_some_and(|n| n.is(tag))
    }

    /// Whether this is a text leaf made only of whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.as_text().is_some_and(|t| t.trim().is_empty())
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::new("root")
            .with_child("Hello ")
            .with_child(Node::new("em").with_child("big"))
            .with_child(" world")
    }

    #[test]
    fn test_text_content() {
        assert_eq!(sample().text_content(), "Hello big world");
    }

    #[test]
    fn test_classes() {
        let mut node = Node::new("p");
        assert!(!node.has_class("pause-before"));
        node.add_class("pause-before");
        node.add_class("pause-before");
        assert_eq!(node.attr("class"), Some("pause-before"));
        node.add_class("wide");
        assert_eq!(node.attr("class"), Some("pause-before wide"));
        assert!(node.has_class("wide"));
    }

    #[test]
    fn test_visit_preorder() {
        let mut tags = Vec::new();
        sample().visit(&mut |n| tags.push(n.tag.clone()));
        assert_eq!(tags, vec!["root", "em"]);
        assert!(sample().contains_tag("em"));
        assert!(!sample().contains_tag("splice"));
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{"tag":"p","attrs":{"class":"x"},"children":["a",{"tag":"br"}]}"#;
        let node: Node = serde_json::from_str(json).expect("parse");
        assert_eq!(node.attr("class"), Some("x"));
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].as_text(), Some("a"));
        assert!(node.children[1].is_tag("br"));

        let back = serde_json::to_string(&node).expect("serialize");
        assert_eq!(back, json);
    }
}
