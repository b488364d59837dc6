//! Block-level handlers.

use sidenote_core::{Child, Node};

use super::{HandlerContext, latex_command, latex_environment, missing_attribute, retag};
use crate::markers::{raw, verbatim};

pub(super) fn paragraph(node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    if ctx.is_latex() {
        return Child::Node(raw(node.children).with_child(verbatim("\n\n")));
    }
    Child::Node(node)
}

/// An optional `cite` attribute becomes an attribution line.
pub(super) fn blockquote(mut node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    let cite = node.attrs.remove("cite");

    if ctx.is_latex() {
        let mut children = node.children;
        if let Some(cite) = cite {
            children.push(verbatim("\n\\hfill\\textemdash{} "));
            children.push(Child::Text(cite));
        }
        return latex_environment("quote", children);
    }

    if let Some(cite) = cite {
        node.children.push(Child::Node(Node::new("footer").with_child(cite)));
    }
    Child::Node(node)
}

/// `style="numbered"` gives an ordered list; anything else is bulleted.
pub(super) fn list(mut node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    let numbered = node.attrs.remove("style").is_some_and(|s| s == "numbered");
    node.children.retain(|c| !c.is_whitespace());

    if ctx.is_latex() {
        let env = if numbered { "enumerate" } else { "itemize" };
        return latex_environment(env, node.children);
    }
    retag(node, if numbered { "ol" } else { "ul" })
}

pub(super) fn item(node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    if ctx.is_latex() {
        return Child::Node(
            raw([verbatim("\\item ")])
                .with_children(node.children)
                .with_child(verbatim("\n")),
        );
    }
    retag(node, "li")
}

pub(super) fn section(node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    if ctx.is_latex() {
        return Child::Node(raw([
            verbatim("\n"),
            latex_command("section*", node.children),
            verbatim("\n"),
        ]));
    }
    retag(node, "h2")
}

pub(super) fn centered(node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    if ctx.is_latex() {
        return latex_environment("center", node.children);
    }
    Child::Node(
        Node::new("div")
            .with_attr("class", "center")
            .with_children(node.children),
    )
}

/// Figure with `src`; the children are the caption. `fullwidth="true"`
/// spans the text block and the margin.
pub(super) fn figure(node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    let Some(src) = node.attr("src").map(str::to_string) else {
        return missing_attribute(node, "src");
    };
    let fullwidth = node.attr("fullwidth").is_some_and(|v| v != "false");

    if ctx.is_latex() {
        let env = if fullwidth { "figure*" } else { "figure" };
        return Child::Node(
            raw([
                verbatim(format!("\n\\begin{{{env}}}[h]\n\\includegraphics{{")),
                verbatim(src),
                verbatim("}\n\\caption{"),
            ])
            .with_children(node.children)
            .with_child(verbatim(format!("}}\n\\end{{{env}}}\n"))),
        );
    }

    let alt = node
        .attr("alt")
        .map(str::to_string)
        .unwrap_or_else(|| node.text_content().trim().to_string());
    let mut figure = Node::new("figure");
    if fullwidth {
        figure.set_attr("class", "fullwidth");
    }
    figure = figure.with_child(Node::new("img").with_attr("src", src).with_attr("alt", alt));
    if !node.children.iter().all(Child::is_whitespace) {
        figure = figure.with_child(Node::new("figcaption").with_children(node.children));
    }
    Child::Node(figure)
}

/// Preformatted code; the body is taken as plain text.
pub(super) fn code_block(node: Node, ctx: &mut HandlerContext<'_>) -> Child {
    let source = node.text_content();
    let source = source.trim_matches('\n');

    if ctx.is_latex() {
        return Child::Node(raw([verbatim(format!(
            "\n\\begin{{verbatim}}\n{source}\n\\end{{verbatim}}\n"
        ))]));
    }

    let mut code = Node::new("code").with_child(source);
    let mut pre = Node::new("pre").with_attr("class", "code");
    if let Some(lang) = node.attr("lang") {
        code.set_attr("class", format!("language-{lang}"));
        pre.add_class(lang);
    }
    Child::Node(pre.with_child(code))
}
