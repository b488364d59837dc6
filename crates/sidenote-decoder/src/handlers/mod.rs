//! Per-tag handlers.
//!
//! A handler receives a node whose children are already expanded, plus the
//! current target, and returns its replacement. HTML output is plain
//! structural nodes; LaTeX output is a `txt` container mixing literal LaTeX
//! (wrapped so no transform touches it) with the original prose children.

mod block;
mod inline;
mod margin;
mod verse;

use std::collections::HashMap;

pub use inline::index_key;
pub use margin::strip_hyperlinks;
use sidenote_core::{Child, Node, Target};
pub use verse::{latex_line_breaks, longest_line};

use crate::{
    ids::IdSource,
    markers::{raw, verbatim},
};

/// State handed to every handler invocation.
pub struct HandlerContext<'a> {
    target: Target,
    ids: &'a mut IdSource,
}

impl<'a> HandlerContext<'a> {
    /// Create a context for one decode run.
    pub fn new(target: Target, ids: &'a mut IdSource) -> Self {
        Self { target, ids }
    }

    /// The output target.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Whether output goes through the LaTeX path.
    pub fn is_latex(&self) -> bool {
        self.target.is_latex()
    }

    /// A fresh document-unique id.
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.ids.next_id(prefix)
    }

    /// Claim an id emitted verbatim so it is never issued.
    pub fn reserve(&mut self, id: &str) {
        self.ids.reserve(id);
    }
}

/// A tag handler.
pub type Handler = fn(Node, &mut HandlerContext<'_>) -> Child;

/// Mapping from tag name to handler.
#[derive(Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();

        registry.register("p", block::paragraph);
        registry.register("blockquote", block::blockquote);
        registry.register("list", block::list);
        registry.register("item", block::item);
        registry.register("figure", block::figure);
        registry.register("section", block::section);
        registry.register("code-block", block::code_block);
        registry.register("centered", block::centered);

        registry.register("sup", inline::superscript);
        registry.register("i", inline::italics);
        registry.register("em", inline::emphasis);
        registry.register("code", inline::code);
        registry.register("color", inline::color);
        registry.register("smallcaps", inline::smallcaps);
        registry.register("math", inline::math);
        registry.register("newthought", inline::newthought);
        registry.register("link", inline::link);
        registry.register("index-entry", inline::index_entry);

        registry.register("margin-note", margin::margin_note);
        registry.register("sidenote", margin::sidenote);
        registry.register("margin-figure", margin::margin_figure);

        registry.register("verse", verse::verse);

        registry
    }
}

impl HandlerRegistry {
    /// A registry with no handlers.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register or replace the handler for `tag`.
    pub fn register(&mut self, tag: impl Into<String>, handler: Handler) {
        self.handlers.insert(tag.into(), handler);
    }

    /// Look up the handler for `tag`.
    pub fn get(&self, tag: &str) -> Option<Handler> {
        self.handlers.get(tag).copied()
    }

    /// Whether `tag` has a handler.
    pub fn contains(&self, tag: &str) -> bool {
        self.handlers.contains_key(tag)
    }

    /// Registered tag names, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

/// `\name{children}` as a raw container.
fn latex_command(name: &str, children: Vec<Child>) -> Child {
    Child::Node(
        raw([verbatim(format!("\\{name}{{"))])
            .with_children(children)
            .with_child(verbatim("}")),
    )
}

/// `\begin{name} children \end{name}` as a raw container.
fn latex_environment(name: &str, children: Vec<Child>) -> Child {
    Child::Node(
        raw([verbatim(format!("\n\\begin{{{name}}}\n"))])
            .with_children(children)
            .with_child(verbatim(format!("\n\\end{{{name}}}\n"))),
    )
}

/// Keep attributes and children under a new tag.
fn retag(node: Node, tag: &str) -> Child {
    Child::Node(Node {
        tag: tag.to_string(),
        ..node
    })
}

/// A required attribute is missing: hand the node back untouched.
fn missing_attribute(node: Node, attr: &str) -> Child {
    tracing::warn!(tag = %node.tag, attr, "required attribute missing, leaving node as is");
    Child::Node(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_covers_markup_tags() {
        let registry = HandlerRegistry::default();
        for tag in [
            "p", "blockquote", "list", "item", "sup", "i", "em", "figure", "margin-note",
            "sidenote", "margin-figure", "section", "code", "code-block", "centered", "color",
            "smallcaps", "math", "verse", "newthought", "link", "index-entry",
        ] {
            assert!(registry.contains(tag), "{tag}");
        }
        assert!(!registry.contains("splice"));
    }

    #[test]
    fn test_register_custom_handler() {
        fn shout(node: Node, _ctx: &mut HandlerContext<'_>) -> Child {
            Child::Text(node.text_content().to_uppercase())
        }

        let mut registry = HandlerRegistry::empty();
        registry.register("shout", shout);
        assert_eq!(registry.tags(), vec!["shout"]);

        let mut ids = IdSource::new();
        let mut ctx = HandlerContext::new(Target::Html, &mut ids);
        let handler = registry.get("shout").unwrap();
        assert_eq!(
            handler(Node::new("shout").with_child("hey"), &mut ctx),
            Child::from("HEY")
        );
    }

    #[test]
    fn test_latex_helpers() {
        let cmd = latex_command("emph", vec!["x".into()]);
        assert_eq!(cmd.as_node().unwrap().text_content(), r"\emph{x}");

        let env = latex_environment("quote", vec!["q".into()]);
        assert_eq!(
            env.as_node().unwrap().text_content(),
            "\n\\begin{quote}\nq\n\\end{quote}\n"
        );
    }
}
