//! Margin constructs: margin notes, numbered sidenotes and margin figures.
//!
//! In HTML each one is a toggle label, a checkbox and the note itself,
//! sharing a fresh id and spliced into the surrounding text. In LaTeX the
//! template typesets links as margin notes of their own, and margin notes
//! cannot nest, so links inside the note are flattened to plain text first.

use sidenote_core::{Child, Node};

use super::{HandlerContext, latex_command, missing_attribute};
use crate::{
    markers::{raw, splice, take_hyperlink, verbatim},
    text::latex_escape,
};

const TOGGLE_SYMBOL: &str = "⊕";

pub(super) fn margin_note(node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    if ctx.is_latex() {
        return latex_command("marginnote", strip_hyperlinks(node.children));
    }

    let id = ctx.next_id("mn");
    let note = Node::new("span")
        .with_attr("class", "marginnote")
        .with_children(node.children);
    let [label, input] = toggle(&id, "margin-toggle", Some(TOGGLE_SYMBOL));
    Child::Node(splice([label, input, note]))
}

/// A numbered footnote, set as a sidenote in HTML.
pub(super) fn sidenote(node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    if ctx.is_latex() {
        return latex_command("footnote", strip_hyperlinks(node.children));
    }

    let id = ctx.next_id("sn");
    let note = Node::new("span")
        .with_attr("class", "sidenote")
        .with_children(node.children);
    let [label, input] = toggle(&id, "margin-toggle sidenote-number", None);
    Child::Node(splice([label, input, note]))
}

/// An image in the margin with `src`; the children are the caption.
pub(super) fn margin_figure(node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    let Some(src) = node.attr("src").map(str::to_string) else {
        return missing_attribute(node, "src");
    };

    if ctx.is_latex() {
        return Child::Node(
            raw([
                verbatim("\n\\begin{marginfigure}\n\\includegraphics{"),
                verbatim(src),
                verbatim("}\n\\caption{"),
            ])
            .with_children(strip_hyperlinks(node.children))
            .with_child(verbatim("}\n\\end{marginfigure}\n")),
        );
    }

    let id = ctx.next_id("mf");
    let alt = node
        .attr("alt")
        .map(str::to_string)
        .unwrap_or_else(|| node.text_content().trim().to_string());
    let note = Node::new("span")
        .with_attr("class", "marginnote")
        .with_child(Node::new("img").with_attr("src", src).with_attr("alt", alt))
        .with_children(node.children);
    let [label, input] = toggle(&id, "margin-toggle", Some(TOGGLE_SYMBOL));
    Child::Node(splice([label, input, note]))
}

fn toggle(id: &str, label_class: &str, symbol: Option<&str>) -> [Node; 2] {
    let mut label = Node::new("label")
        .with_attr("for", id)
        .with_attr("class", label_class);
    if let Some(symbol) = symbol {
        label = label.with_child(symbol);
    }
    let input = Node::new("input")
        .with_attr("type", "checkbox")
        .with_attr("id", id)
        .with_attr("class", "margin-toggle");
    [label, input]
}

/// Replace every hyperlink marker, at any depth, with its label followed by
/// ` (see <url>)`.
pub fn strip_hyperlinks(children: Vec<Child>) -> Vec<Child> {
    children
        .into_iter()
        .map(|child| match child {
            Child::Node(node) => Child::Node(strip_node(node)),
            text => text,
        })
        .collect()
}

fn strip_node(node: Node) -> Node {
    match take_hyperlink(node) {
        Ok((href, label)) => raw(strip_hyperlinks(label))
            .with_child(" (see ")
            .with_child(verbatim(latex_escape(&href)))
            .with_child(")"),
        Err(node) => Node {
            children: strip_hyperlinks(node.children),
            ..node
        },
    }
}
