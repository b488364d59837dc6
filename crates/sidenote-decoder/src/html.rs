//! HTML serialization of decoded trees.

use sidenote_core::{Child, Node};

/// Elements written without a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose text content is written unescaped.
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// Serialize a node and its descendants.
pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Serialize a list of children without a wrapping element.
pub fn children_to_html(children: &[Child]) -> String {
    let mut out = String::new();
    for child in children {
        write_child(child, false, &mut out);
    }
    out
}

fn write_node(node: &Node, out: &mut String) {
    out.push('<');
    out.push_str(&node.tag);
    for (key, value) in &node.attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }
    out.push('>');

    if VOID_TAGS.contains(&node.tag.as_str()) {
        return;
    }

    let raw = RAW_TEXT_TAGS.contains(&node.tag.as_str());
    for child in &node.children {
        write_child(child, raw, out);
    }
    out.push_str("</");
    out.push_str(&node.tag);
    out.push('>');
}

fn write_child(child: &Child, raw: bool, out: &mut String) {
    match child {
        Child::Text(text) if raw => out.push_str(text),
        Child::Text(text) => out.push_str(&escape_text(text)),
        Child::Node(node) => write_node(node, out),
    }
}

/// Escape `&`, `<` and `>`.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements_and_attributes() {
        let node = Node::new("a")
            .with_attr("href", "/q?a=1&b=\"2\"")
            .with_attr("class", "x")
            .with_child("Tom & Jerry");
        assert_eq!(
            to_html(&node),
            r#"<a class="x" href="/q?a=1&amp;b=&quot;2&quot;">Tom &amp; Jerry</a>"#
        );
    }

    #[test]
    fn test_void_elements() {
        let node = Node::new("p")
            .with_child("a")
            .with_child(Node::new("br"))
            .with_child(Node::new("img").with_attr("src", "x.png"));
        assert_eq!(to_html(&node), r#"<p>a<br><img src="x.png"></p>"#);
    }

    #[test]
    fn test_raw_text_and_children() {
        let script = Node::new("script").with_child("if (a < b) {}");
        assert_eq!(to_html(&script), "<script>if (a < b) {}</script>");

        let children = vec![Child::from("1 < 2 "), Child::Node(Node::new("em").with_child("ok"))];
        assert_eq!(children_to_html(&children), "1 &lt; 2 <em>ok</em>");
    }
}
