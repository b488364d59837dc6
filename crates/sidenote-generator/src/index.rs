//! Cross-document keyword index.
//!
//! Index entries are the anchors left in decoded HTML bodies by
//! `◊index-entry`: nodes with class `index-entry` whose `id` is the keyword.

use serde::Serialize;
use sidenote_core::Node;
use tracing::{debug, warn};

const INDEX_ENTRY_CLASS: &str = "index-entry";

/// One document fed to the index builder.
#[derive(Debug, Clone, Copy)]
pub struct IndexSource<'a> {
    /// Document id, used as the link target.
    pub id: &'a str,
    /// Title used as the link label.
    pub title: &'a str,
    /// Decoded HTML body, if the document could be decoded.
    pub body: Option<&'a Node>,
}

/// A link from the index to one entry in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexLink {
    /// Entry id. `None` for placeholder links.
    #[serde(skip)]
    pub keyword: Option<String>,
    /// `<document-id>#<entry-id>`, or `#` for placeholders.
    pub href: String,
    /// Document title.
    pub label: String,
}

/// Links grouped under one heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexGroup<'a> {
    pub keyword: &'a str,
    pub links: Vec<&'a IndexLink>,
}

/// Keyword index over a set of documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordIndex {
    links: Vec<IndexLink>,
}

impl KeywordIndex {
    /// Build the index from documents in order.
    pub fn build(sources: &[IndexSource<'_>]) -> Self {
        let mut links = Vec::new();

        for source in sources {
            let Some(body) = source.body else {
                warn!(id = source.id, "document has no body, adding placeholder");
                links.push(IndexLink {
                    keyword: None,
                    href: "#".to_string(),
                    label: format!("No body for {}", source.id),
                });
                continue;
            };

            let before = links.len();
            body.visit(&mut |node| {
                if !node.has_class(INDEX_ENTRY_CLASS) {
                    return;
                }
                if let Some(id) = node.attr("id") {
                    links.push(IndexLink {
                        keyword: Some(id.to_string()),
                        href: format!("{}#{id}", source.id),
                        label: source.title.to_string(),
                    });
                }
            });
            debug!(id = source.id, entries = links.len() - before, "indexed document");
        }

        Self { links }
    }

    /// Every link, in document order.
    pub fn links(&self) -> &[IndexLink] {
        &self.links
    }

    /// Distinct keywords, sorted ignoring case.
    ///
    /// Keywords differing only in case are separate headings.
    pub fn headings(&self) -> Vec<&str> {
        let mut headings: Vec<&str> = self
            .links
            .iter()
            .filter_map(|link| link.keyword.as_deref())
            .collect();
        headings.sort_unstable_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then(a.cmp(b)));
        headings.dedup();
        headings
    }

    /// Links whose entry id is exactly `keyword`.
    pub fn links_for(&self, keyword: &str) -> Vec<&IndexLink> {
        self.links
            .iter()
            .filter(|link| link.keyword.as_deref() == Some(keyword))
            .collect()
    }

    /// Placeholder links for documents without a body.
    pub fn placeholders(&self) -> Vec<&IndexLink> {
        self.links.iter().filter(|link| link.keyword.is_none()).collect()
    }

    /// Links grouped by heading, in heading order.
    pub fn groups(&self) -> Vec<IndexGroup<'_>> {
        self.headings()
            .into_iter()
            .map(|keyword| IndexGroup {
                keyword,
                links: self.links_for(keyword),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The index as an HTML tree: a heading, then one entry per keyword
    /// listing its links.
    pub fn to_node(&self, title: &str) -> Node {
        let mut section = Node::new("section")
            .with_attr("class", "keyword-index")
            .with_child(Node::new("h1").with_child(title));

        let mut headings = Node::new("ul");
        for group in self.groups() {
            let links = Node::new("ul").with_children(group.links.into_iter().map(link_item));
            headings = headings.with_child(
                Node::new("li")
                    .with_attr("class", "index-heading")
                    .with_child(group.keyword)
                    .with_child(links),
            );
        }
        section = section.with_child(headings);

        let placeholders = self.placeholders();
        if !placeholders.is_empty() {
            section = section.with_child(
                Node::new("ul")
                    .with_attr("class", "index-missing")
                    .with_children(placeholders.into_iter().map(link_item)),
            );
        }

        section
    }
}

impl Serialize for KeywordIndex {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.groups().serialize(serializer)
    }
}

fn link_item(link: &IndexLink) -> Node {
    Node::new("li").with_child(
        Node::new("a")
            .with_attr("href", &link.href)
            .with_child(link.label.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> Node {
        Node::new("a")
            .with_attr("id", id)
            .with_attr("class", INDEX_ENTRY_CLASS)
            .with_child(id)
    }

    fn bodies() -> (Node, Node) {
        let first = Node::new("body")
            .with_child(Node::new("p").with_child(entry("banana")).with_child(entry("Apple")));
        let second = Node::new("body").with_child(entry("apple")).with_child(entry("banana"));
        (first, second)
    }

    #[test]
    fn test_case_variants_are_distinct_headings() {
        let (first, second) = bodies();
        let index = KeywordIndex::build(&[
            IndexSource {
                id: "one.html",
                title: "One",
                body: Some(&first),
            },
            IndexSource {
                id: "two.html",
                title: "Two",
                body: Some(&second),
            },
        ]);

        assert_eq!(index.headings(), vec!["Apple", "apple", "banana"]);

        let apple = index.links_for("Apple");
        assert_eq!(apple.len(), 1);
        assert_eq!(apple[0].href, "one.html#Apple");
        assert_eq!(apple[0].label, "One");

        let banana: Vec<_> = index
            .links_for("banana")
            .into_iter()
            .map(|l| l.href.as_str())
            .collect();
        assert_eq!(banana, vec!["one.html#banana", "two.html#banana"]);
        assert!(index.placeholders().is_empty());
    }

    #[test]
    fn test_missing_body_placeholder() {
        let index = KeywordIndex::build(&[IndexSource {
            id: "draft.html",
            title: "Draft",
            body: None,
        }]);

        assert!(index.headings().is_empty());
        let placeholders = index.placeholders();
        assert_eq!(placeholders.len(), 1);
        assert_eq!(placeholders[0].href, "#");
        assert_eq!(placeholders[0].label, "No body for draft.html");
    }

    #[test]
    fn test_entries_without_id_are_ignored() {
        let body = Node::new("body").with_child(
            Node::new("span")
                .with_attr("class", INDEX_ENTRY_CLASS)
                .with_child("no id"),
        );
        let index = KeywordIndex::build(&[IndexSource {
            id: "a.html",
            title: "A",
            body: Some(&body),
        }]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_serialize_groups() {
        let (first, _) = bodies();
        let index = KeywordIndex::build(&[IndexSource {
            id: "one.html",
            title: "One",
            body: Some(&first),
        }]);
        let json = serde_json::to_value(&index).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"keyword": "Apple", "links": [{"href": "one.html#Apple", "label": "One"}]},
                {"keyword": "banana", "links": [{"href": "one.html#banana", "label": "One"}]},
            ])
        );
    }

    #[test]
    fn test_to_node() {
        let (first, _) = bodies();
        let index = KeywordIndex::build(&[
            IndexSource {
                id: "one.html",
                title: "One",
                body: Some(&first),
            },
            IndexSource {
                id: "gone.html",
                title: "Gone",
                body: None,
            },
        ]);
        let node = index.to_node("Index");
        assert!(node.has_class("keyword-index"));
        assert_eq!(node.children[0].as_node().unwrap().text_content(), "Index");
        assert!(node.contains_tag("a"));
        assert!(node.children.last().unwrap().as_node().unwrap().has_class("index-missing"));
    }
}
