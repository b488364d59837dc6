//! Paragraph detection for the HTML path.
//!
//! Runs of inline content separated by blank lines, or by block-level
//! elements, are wrapped in `p`. Single newlines inside a paragraph become
//! `br`. A child list with no break at all is left alone, which keeps the
//! pass idempotent on its own output.

use std::sync::LazyLock;

use regex::Regex;
use sidenote_core::{Child, Node};

/// Tags treated as block-level.
pub const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "dd", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table",
    "ul", "video",
];

/// Containers whose children are never paragraph-wrapped.
pub const PARAGRAPH_EXCLUDED: &[&str] = &["pre", "figure", "script", "style", "table", "p"];

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid paragraph break pattern"));

/// Whether `node` is block-level.
pub fn is_block(node: &Node) -> bool {
    BLOCK_TAGS.contains(&node.tag.as_str())
}

/// Detect paragraphs in `root` and, recursively, in its block-level containers.
pub fn detect_paragraphs(root: Node) -> Node {
    if PARAGRAPH_EXCLUDED.contains(&root.tag.as_str()) {
        return root;
    }

    let children = root
        .children
        .into_iter()
        .map(|child| match child {
            Child::Node(node) if is_block(&node) => Child::Node(detect_paragraphs(node)),
            other => other,
        })
        .collect();

    Node {
        tag: root.tag,
        attrs: root.attrs,
        children: wrap_paragraphs(children),
    }
}

/// Wrap inline runs of one child list in paragraphs, if it has any break.
pub fn wrap_paragraphs(children: Vec<Child>) -> Vec<Child> {
    let children = merge_text(children);
    if !children.iter().any(is_break) {
        return children;
    }

    let mut out = Vec::with_capacity(children.len());
    let mut run = Vec::new();

    for child in children {
        match child {
            Child::Text(text) => {
                for (i, piece) in PARAGRAPH_BREAK.split(&text).enumerate() {
                    if i > 0 {
                        flush_run(&mut run, &mut out);
                    }
                    if !piece.is_empty() {
                        run.push(Child::Text(piece.to_string()));
                    }
                }
            }
            Child::Node(node) if is_block(&node) => {
                flush_run(&mut run, &mut out);
                out.push(Child::Node(node));
            }
            other => run.push(other),
        }
    }
    flush_run(&mut run, &mut out);

    out
}

fn is_break(child: &Child) -> bool {
    match child {
        Child::Text(text) => PARAGRAPH_BREAK.is_match(text),
        Child::Node(node) => is_block(node),
    }
}

fn merge_text(children: Vec<Child>) -> Vec<Child> {
    let mut out: Vec<Child> = Vec::with_capacity(children.len());
    for child in children {
        match (out.last_mut(), child) {
            (Some(Child::Text(prev)), Child::Text(text)) => prev.push_str(&text),
            (_, child) => out.push(child),
        }
    }
    out
}

fn flush_run(run: &mut Vec<Child>, out: &mut Vec<Child>) {
    let mut items = std::mem::take(run);

    if let Some(Child::Text(first)) = items.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(Child::Text(last)) = items.last_mut() {
        *last = last.trim_end().to_string();
    }
    items.retain(|c| c.as_text().is_none_or(|t| !t.is_empty()));

    if items.iter().all(Child::is_whitespace) {
        return;
    }

    let mut paragraph = Node::new("p");
    for item in items {
        match item {
            Child::Text(text) => push_with_line_breaks(&mut paragraph, &text),
            node => paragraph.children.push(node),
        }
    }
    out.push(Child::Node(paragraph));
}

fn push_with_line_breaks(paragraph: &mut Node, text: &str) {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            paragraph.children.push(Child::Node(Node::new("br")));
        }
        if !line.is_empty() {
            paragraph.children.push(Child::Text(line.to_string()));
        }
    }
}
