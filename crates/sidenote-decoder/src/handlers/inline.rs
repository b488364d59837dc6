//! Inline handlers.

use sidenote_core::{Child, Node};

use super::{HandlerContext, latex_command, missing_attribute};
use crate::markers::{hyperlink, raw, verbatim};

pub(super) fn superscript(node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    if ctx.is_latex() {
        latex_command("textsuperscript", node.children)
    } else {
        Child::Node(node)
    }
}

pub(super) fn italics(node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    if ctx.is_latex() {
        latex_command("textit", node.children)
    } else {
        Child::Node(node)
    }
}

pub(super) fn emphasis(node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    if ctx.is_latex() {
        latex_command("emph", node.children)
    } else {
        Child::Node(node)
    }
}

pub(super) fn code(node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    if ctx.is_latex() {
        latex_command("texttt", node.children)
    } else {
        Child::Node(node)
    }
}

pub(super) fn smallcaps(node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    if ctx.is_latex() {
        return latex_command("textsc", node.children);
    }
    let mut span = Node {
        tag: "span".to_string(),
        ..node
    };
    span.add_class("smallcaps");
    Child::Node(span)
}

pub(super) fn newthought(node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    if ctx.is_latex() {
        return latex_command("newthought", node.children);
    }
    Child::Node(
        Node::new("span")
            .with_attr("class", "newthought")
            .with_children(node.children),
    )
}

pub(super) fn color(node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    let Some(color) = node.attr("color").map(str::to_string) else {
        return missing_attribute(node, "color");
    };

    if ctx.is_latex() {
        return Child::Node(
            raw([verbatim(format!("\\textcolor{{{color}}}{{"))])
                .with_children(node.children)
                .with_child(verbatim("}")),
        );
    }
    Child::Node(
        Node::new("span")
            .with_attr("style", format!("color: {color}"))
            .with_children(node.children),
    )
}

/// Math is passed to MathJax in HTML and to TeX untouched.
pub(super) fn math(node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    let source = node.text_content();
    if ctx.is_latex() {
        return verbatim(format!("${source}$"));
    }
    Child::Node(
        Node::new("span")
            .with_attr("class", "math")
            .with_child("\\(")
            .with_child(source)
            .with_child("\\)"),
    )
}

/// `◊link[href="…"]{label}`, or `◊link{https://…}` using the text as both.
pub(super) fn link(node: Node, _ctx: &mut HandlerContext<'_>) -> Child {
    if let Some(href) = node.attr("href").map(str::to_string) {
        return Child::Node(hyperlink(href, node.children));
    }

    let text = node.text_content();
    let url = text.trim();
    if url.is_empty() {
        return missing_attribute(node, "href");
    }
    Child::Node(hyperlink(url, vec![Child::Text(url.to_string())]))
}

/// The anchor id an `index-entry` node carries: its `key`, else its trimmed text.
pub fn index_key(node: &Node) -> Option<String> {
    let key = match node.attr("key") {
        Some(key) => key.to_string(),
        None => node.text_content().trim().to_string(),
    };
    (!key.is_empty()).then_some(key)
}

/// Marks a keyword for the site index; the keyword defaults to the text.
pub(super) fn index_entry(node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    let Some(key) = index_key(&node) else {
        return missing_attribute(node, "key");
    };

    if ctx.is_latex() {
        return Child::Node(
            raw(node.children)
                .with_child(verbatim("\\index{"))
                .with_child(key)
                .with_child(verbatim("}")),
        );
    }
    ctx.reserve(&key);
    Child::Node(
        Node::new("a")
            .with_attr("id", key)
            .with_attr("class", "index-entry")
            .with_children(node.children),
    )
}
