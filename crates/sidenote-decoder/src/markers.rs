//! Reserved marker tags produced by handlers and consumed by the decoder.

use sidenote_core::{Child, Node};

/// Wrapper whose children are lifted into the parent.
pub const SPLICE: &str = "splice";

/// Unresolved link; `href` attribute, children are the label.
pub const HYPERLINK: &str = "hyperlink";

/// Raw LaTeX container. Text inside still gets prose transforms.
pub const TXT: &str = "txt";

/// Raw LaTeX container excluded from every text transform.
pub const TXT_NOESCAPE: &str = "txt-noescape";

/// Build a splice marker.
pub fn splice<I, C>(children: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Child>,
{
    Node::new(SPLICE).with_children(children)
}

/// Build an unresolved hyperlink marker.
pub fn hyperlink(href: impl Into<String>, label: Vec<Child>) -> Node {
    Node::new(HYPERLINK).with_attr("href", href).with_children(label)
}

/// Build a raw LaTeX container.
pub fn raw<I, C>(parts: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Child>,
{
    Node::new(TXT).with_children(parts)
}

/// Wrap literal LaTeX so no transform touches it.
pub fn verbatim(latex: impl Into<String>) -> Child {
    Child::Node(Node::new(TXT_NOESCAPE).with_child(latex.into()))
}

/// Split a well-formed hyperlink marker into its href and label.
///
/// Anything else, including a marker without `href`, is handed back unchanged.
pub fn take_hyperlink(node: Node) -> Result<(String, Vec<Child>), Node> {
    if !node.is(HYPERLINK) {
        return Err(node);
    }
    match node.attr("href") {
        Some(href) => Ok((href.to_string(), node.children)),
        None => {
            tracing::warn!("hyperlink marker without href left as is");
            Err(node)
        }
    }
}
