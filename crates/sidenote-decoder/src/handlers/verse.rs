//! Poetry.

use sidenote_core::{Child, Node};

use super::HandlerContext;
use crate::markers::{raw, verbatim};

/// The longest line of `text` by character count. Ties go to the first.
pub fn longest_line(text: &str) -> &str {
    let mut longest = "";
    let mut longest_len = 0;
    for line in text.split('\n') {
        let len = line.chars().count();
        if len > longest_len {
            longest = line;
            longest_len = len;
        }
    }
    longest
}

/// Turn each lone newline into a LaTeX line break. Newlines that are part of
/// a blank-line run separate stanzas and are kept as is.
pub fn latex_line_breaks(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 16);

    for (i, &c) in chars.iter().enumerate() {
        let lone = c == '\n'
            && (i == 0 || chars[i - 1] != '\n')
            && chars.get(i + 1).is_none_or(|&n| n != '\n');
        if lone {
            out.push_str(" \\\\\n");
        } else {
            out.push(c);
        }
    }

    out
}

/// `◊verse[title="…" italic="true"]{…}`. Line breaks and indentation are
/// significant.
pub(super) fn verse(node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    let text = node.text_content();
    let text = text.trim_matches('\n');
    let title = node.attr("title").map(str::to_string);
    let italic = node.attr("italic") == Some("true");

    if ctx.is_latex() {
        let mut out = raw(Vec::<Child>::new());
        if let Some(title) = title {
            out = out
                .with_child(verbatim("\\textbf{"))
                .with_child(title)
                .with_child(verbatim("}\n\n"));
        }
        out = out
            .with_child(verbatim("\\settowidth{\\versewidth}{"))
            .with_child(longest_line(text))
            .with_child(verbatim("}\n\\begin{verse}[\\versewidth]\n"));

        let body = latex_line_breaks(&text.replace("  ", "\\vin "));
        if italic {
            out = out
                .with_child(verbatim("{\\itshape "))
                .with_child(body)
                .with_child(verbatim("}"));
        } else {
            out = out.with_child(body);
        }
        return Child::Node(out.with_child(verbatim("\n\\end{verse}\n")));
    }

    let mut poem = Node::new("div").with_attr("class", "poem");
    if let Some(title) = title {
        poem = poem.with_child(
            Node::new("p")
                .with_attr("class", "verse-heading")
                .with_child(title),
        );
    }
    let class = if italic { "verse italic" } else { "verse" };
    Child::Node(poem.with_child(Node::new("pre").with_attr("class", class).with_child(text)))
}
