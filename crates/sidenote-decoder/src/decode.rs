//! The two-target tree decoder.

use sidenote_core::{Child, Node, Target};
use tracing::{debug, warn};

use crate::{
    handlers::{HandlerContext, HandlerRegistry, index_key},
    html,
    ids::IdSource,
    markers::{HYPERLINK, SPLICE, TXT_NOESCAPE, raw, take_hyperlink, verbatim},
    paragraphs::detect_paragraphs,
    text::{latex_escape, smart_dashes, smart_quotes},
};

/// Tags whose text is never typographically transformed in HTML.
const HTML_RAW_TEXT: &[&str] = &["pre", "code", "script", "style"];

/// Tags whose text is never escaped or transformed in LaTeX.
const LATEX_RAW_TEXT: &[&str] = &[TXT_NOESCAPE, "script", "style"];

/// Decoder options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Curl quotes and turn `--`/`---` into dashes.
    pub smart_typography: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            smart_typography: true,
        }
    }
}

/// The result of decoding one document.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// A tree rooted at `body`.
    Html(Node),
    /// A flat LaTeX string.
    Latex(String),
}

impl Decoded {
    pub fn as_html(&self) -> Option<&Node> {
        match self {
            Self::Html(node) => Some(node),
            Self::Latex(_) => None,
        }
    }

    pub fn as_latex(&self) -> Option<&str> {
        match self {
            Self::Latex(latex) => Some(latex),
            Self::Html(_) => None,
        }
    }

    /// Serialize to the final output text.
    pub fn render(&self) -> String {
        match self {
            Self::Html(node) => html::to_html(node),
            Self::Latex(latex) => latex.clone(),
        }
    }
}

/// Rewrites a document tree for a target.
///
/// Decoding never fails: nodes that do not have the shape a handler or a
/// pass expects are kept as they are and logged.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    registry: HandlerRegistry,
    options: DecodeOptions,
}

impl Decoder {
    /// A decoder with the default handlers and options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Decode `root` for `target`.
    ///
    /// Every `id` already in the document, and every index-entry anchor
    /// expansion will add, is reserved in `ids` first, so generated anchors
    /// never collide with authored ones.
    pub fn decode(&self, root: Node, target: Target, ids: &mut IdSource) -> Decoded {
        ids.reserve_from(&root);
        reserve_index_keys(&root, ids);
        let expanded = self.expand(root, target, ids);

        if target.is_latex() {
            let latex = self.finish_latex(expanded, false).text_content();
            debug!(output = %target, bytes = latex.len(), "decoded document");
            Decoded::Latex(latex)
        } else {
            let mut body = self.finish_html(detect_paragraphs(expanded), false);
            body.tag = "body".to_string();
            debug!(output = %target, children = body.children.len(), "decoded document");
            Decoded::Html(body)
        }
    }

    /// Run the handler-expansion pass alone.
    ///
    /// Post-order over the root's descendants: children are expanded first,
    /// then the node's own handler runs once. Handler output is not expanded
    /// again.
    pub fn expand(&self, root: Node, target: Target, ids: &mut IdSource) -> Node {
        let mut ctx = HandlerContext::new(target, ids);
        Node {
            children: self.expand_children(root.children, &mut ctx),
            ..root
        }
    }

    fn expand_children(&self, children: Vec<Child>, ctx: &mut HandlerContext<'_>) -> Vec<Child> {
        children
            .into_iter()
            .map(|child| match child {
                Child::Node(node) => self.expand_node(node, ctx),
                text => text,
            })
            .collect()
    }

    fn expand_node(&self, node: Node, ctx: &mut HandlerContext<'_>) -> Child {
        let node = Node {
            children: self.expand_children(node.children, ctx),
            ..node
        };
        match self.registry.get(&node.tag) {
            Some(handler) => handler(node, ctx),
            None => Child::Node(node),
        }
    }

    fn finish_html(&self, node: Node, raw_text: bool) -> Node {
        let raw_text = raw_text || is_html_raw_text(&node);

        let mut children = Vec::with_capacity(node.children.len());
        for child in node.children {
            self.push_html(child, raw_text, &mut children);
        }
        let mut node = Node { children, ..node };

        if node.is("p") && starts_with_newthought(&node) {
            node.add_class("pause-before");
        }
        node
    }

    fn push_html(&self, child: Child, raw_text: bool, out: &mut Vec<Child>) {
        match child {
            Child::Text(text) if raw_text || !self.options.smart_typography => {
                out.push(Child::Text(text));
            }
            Child::Text(text) => out.push(Child::Text(smart_dashes(&smart_quotes(&text)))),
            Child::Node(node) if node.is(SPLICE) => {
                for child in node.children {
                    self.push_html(child, raw_text, out);
                }
            }
            Child::Node(mut node) => {
                if node.is(HYPERLINK) {
                    if node.attr("href").is_some() {
                        node.tag = "a".to_string();
                    } else {
                        warn!("hyperlink marker without href left as is");
                    }
                }
                out.push(Child::Node(self.finish_html(node, raw_text)));
            }
        }
    }

    fn finish_latex(&self, node: Node, raw_text: bool) -> Node {
        let raw_text = raw_text || LATEX_RAW_TEXT.contains(&node.tag.as_str());
        let children = node
            .children
            .into_iter()
            .map(|child| match child {
                Child::Text(text) if raw_text => Child::Text(text),
                Child::Text(text) => Child::Text(self.latex_text(&text)),
                Child::Node(node) => {
                    let node = match take_hyperlink(node) {
                        Ok((href, label)) => href_command(href, label),
                        Err(node) => node,
                    };
                    Child::Node(self.finish_latex(node, raw_text))
                }
            })
            .collect();
        Node { children, ..node }
    }

    fn latex_text(&self, text: &str) -> String {
        if self.options.smart_typography {
            latex_escape(&smart_dashes(&smart_quotes(text)))
        } else {
            latex_escape(text)
        }
    }
}

/// Decode with the default handlers and options.
pub fn decode(root: Node, target: Target, ids: &mut IdSource) -> Decoded {
    Decoder::new().decode(root, target, ids)
}

fn reserve_index_keys(root: &Node, ids: &mut IdSource) {
    root.visit(&mut |node| {
        if node.is("index-entry") {
            if let Some(key) = index_key(node) {
                ids.reserve(key);
            }
        }
    });
}

fn href_command(href: String, label: Vec<Child>) -> Node {
    raw([verbatim("\\href{"), verbatim(href), verbatim("}{")])
        .with_children(label)
        .with_child(verbatim("}"))
}

fn is_html_raw_text(node: &Node) -> bool {
    HTML_RAW_TEXT.contains(&node.tag.as_str()) || (node.is("span") && node.has_class("math"))
}

fn starts_with_newthought(paragraph: &Node) -> bool {
    paragraph
        .children
        .iter()
        .find(|child| !child.is_whitespace())
        .and_then(Child::as_node)
        .is_some_and(|node| node.is("span") && node.has_class("newthought"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html(root: Node) -> Node {
        let mut ids = IdSource::new();
        decode(root, Target::Html, &mut ids).as_html().unwrap().clone()
    }

    fn latex(root: Node) -> String {
        let mut ids = IdSource::new();
        decode(root, Target::Ltx, &mut ids).as_latex().unwrap().to_string()
    }

    fn link(href: &str, label: &str) -> Node {
        Node::new("link").with_attr("href", href).with_child(label)
    }

    #[test]
    fn test_html_root_becomes_body() {
        let root = Node::new("root").with_attr("lang", "en").with_child("Hello");
        let body = html(root);
        assert_eq!(body.tag, "body");
        assert_eq!(body.attr("lang"), Some("en"));
        assert_eq!(body.children, vec![Child::from("Hello")]);
    }

    #[test]
    fn test_hyperlink_both_targets() {
        let root = Node::new("root").with_child(link("https://example.com/a#b", "w"));

        let body = html(root.clone());
        assert!(!body.contains_tag(HYPERLINK));
        let a = body.children[0].as_node().unwrap();
        assert_eq!(a.tag, "a");
        assert_eq!(a.attr("href"), Some("https://example.com/a#b"));
        assert_eq!(a.text_content(), "w");

        assert_eq!(latex(root), r"\href{https://example.com/a#b}{w}");
    }

    #[test]
    fn test_margin_note_with_link_in_latex() {
        let root = Node::new("root").with_child(
            Node::new("margin-note")
                .with_child("See ")
                .with_child(link("https://example.com/50%", "here")),
        );
        let out = latex(root);
        assert_eq!(out, r"\marginnote{See here (see https://example.com/50\%)}");
        assert_eq!(out.matches("\\marginnote").count(), 1);
        assert!(!out.contains("\\href"));
    }

    #[test]
    fn test_margin_note_html_is_spliced() {
        let root = Node::new("root")
            .with_child("Text")
            .with_child(Node::new("margin-note").with_child("aside"))
            .with_child(" more.");
        let body = html(root);
        assert!(!body.contains_tag(SPLICE));
        let tags: Vec<_> = body
            .children
            .iter()
            .map(|c| c.as_node().map(|n| n.tag.as_str()))
            .collect();
        assert_eq!(tags, vec![None, Some("label"), Some("input"), Some("span"), None]);
    }

    #[test]
    fn test_html_decode_is_idempotent() {
        let root = Node::new("root")
            .with_child("\"First\" paragraph -- with a note")
            .with_child(Node::new("sidenote").with_child("n"))
            .with_child(".\n\nSecond ")
            .with_child(link("u", "w"))
            .with_child("\nline.\n\n")
            .with_child(Node::new("blockquote").with_child("q"));

        let once = html(root);
        let twice = html(once.clone());
        assert_eq!(once, twice);
        assert!(!twice.contains_tag(SPLICE));
        assert_eq!(once.children.len(), 3);
    }

    #[test]
    fn test_smart_typography_skips_code() {
        let root = Node::new("root")
            .with_child(Node::new("p").with_child("\"Quote\" -- here "))
            .with_child(Node::new("p").with_child(Node::new("code").with_child("a -- \"b\"")));
        let body = html(root);
        assert_eq!(body.children[0].as_node().unwrap().text_content(), "“Quote” – here ");
        assert_eq!(body.children[1].as_node().unwrap().text_content(), "a -- \"b\"");

        let plain = Decoder::new().with_options(DecodeOptions {
            smart_typography: false,
        });
        let mut ids = IdSource::new();
        let decoded = plain.decode(Node::new("root").with_child("a -- b"), Target::Html, &mut ids);
        assert_eq!(decoded.as_html().unwrap().text_content(), "a -- b");
    }

    #[test]
    fn test_splice_inside_pre_is_lifted() {
        let root = Node::new("root").with_child(
            Node::new("pre").with_child(Node::new(SPLICE).with_child("a -- b").with_child("c")),
        );
        let body = html(root);
        let pre = body.children[0].as_node().unwrap();
        assert_eq!(pre.children, vec![Child::from("a -- b"), Child::from("c")]);
    }

    #[test]
    fn test_newthought_pause_before() {
        let root = Node::new("root")
            .with_child(Node::new("newthought").with_child("In the beginning"))
            .with_child(" there was text.\n\nThen more.");
        let body = html(root);
        let first = body.children[0].as_node().unwrap();
        assert!(first.has_class("pause-before"));
        let second = body.children[1].as_node().unwrap();
        assert!(!second.has_class("pause-before"));
    }

    #[test]
    fn test_latex_escapes_prose_only() {
        let root = Node::new("root")
            .with_child(Node::new("p").with_child("50% of $5 & \"more\""))
            .with_child(Node::new("math").with_child("a % b"));
        assert_eq!(latex(root), "50\\% of \\$5 \\& “more”\n\n$a % b$");
    }

    #[test]
    fn test_malformed_hyperlink_passes_through() {
        let root = Node::new("root").with_child(Node::new(HYPERLINK).with_child("label"));
        let body = html(root);
        assert!(body.children[0].is_tag(HYPERLINK));
        assert_eq!(latex(Node::new("root").with_child(Node::new(HYPERLINK).with_child("x"))), "x");
    }

    #[test]
    fn test_authored_ids_are_reserved() {
        let root = Node::new("root")
            .with_child(Node::new("span").with_attr("id", "mn-1"))
            .with_child(Node::new("margin-note").with_child("note"));
        let body = html(root);
        let input = body.children[2].as_node().unwrap();
        assert_eq!(input.tag, "input");
        assert_eq!(input.attr("id"), Some("mn-2"));
    }

    #[test]
    fn test_index_anchor_never_reissued_as_margin_id() {
        fn ids_in(body: &Node) -> Vec<String> {
            let mut found = Vec::new();
            body.visit(&mut |node| {
                if let Some(id) = node.attr("id") {
                    found.push(id.to_string());
                }
            });
            found
        }

        let entry = || Node::new("index-entry").with_child("sn-1");
        let note = || Node::new("sidenote").with_child("note");

        let entry_first = html(Node::new("root").with_child(entry()).with_child(note()));
        assert_eq!(ids_in(&entry_first), vec!["sn-1", "sn-2"]);

        let note_first = html(Node::new("root").with_child(note()).with_child(entry()));
        assert_eq!(ids_in(&note_first), vec!["sn-2", "sn-1"]);
    }

    #[test]
    fn test_ids_unique_across_documents() {
        let mut ids = IdSource::new();
        let doc = || Node::new("root").with_child(Node::new("sidenote").with_child("n"));
        let first = decode(doc(), Target::Html, &mut ids);
        let second = decode(doc(), Target::Html, &mut ids);
        let id_of = |d: &Decoded| {
            d.as_html().unwrap().children[1].as_node().unwrap().attr("id").map(str::to_string)
        };
        assert_eq!(id_of(&first).as_deref(), Some("sn-1"));
        assert_eq!(id_of(&second).as_deref(), Some("sn-2"));
    }

    #[test]
    fn test_render_html_string() {
        let decoded = Decoded::Html(
            Node::new("body").with_child(Node::new("p").with_child("a < b")),
        );
        assert_eq!(decoded.render(), "<body><p>a &lt; b</p></body>");
        assert_eq!(Decoded::Latex("x".into()).render(), "x");
    }
}
