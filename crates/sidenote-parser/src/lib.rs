//! Sidenote Parser Library
//!
//! Reads source documents into undecoded trees: lozenge markup with
//! frontmatter (`.pm`), or pre-parsed JSON trees (`.json`).

pub mod markup;

use std::path::{Path, PathBuf};

pub use markup::{MarkupError, parse_markup};
use serde::Deserialize;
use sidenote_core::{
    ContentPath, ContentType, CoreError, Frontmatter, Node, SourceDocument,
    frontmatter::parse_frontmatter,
};
use thiserror::Error;

/// Tag of the root node built around markup content.
pub const ROOT_TAG: &str = "root";

/// Parser errors.
#[derive(Debug, Error)]
pub enum ParserError {
    /// Markup syntax error.
    #[error("markup error in {path}: {source}")]
    Markup {
        path: PathBuf,
        #[source]
        source: MarkupError,
    },

    /// JSON document error.
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Frontmatter or other core error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown file extension.
    #[error("unknown file extension: {0}")]
    UnknownExtension(String),
}

/// Result type for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// On-disk shape of a `.json` document.
#[derive(Debug, Deserialize)]
struct JsonDocument {
    #[serde(default)]
    meta: Frontmatter,
    body: Node,
}

/// Registry for document readers with auto-detection by extension.
#[derive(Debug, Clone)]
pub struct ParserRegistry {
    content_root: PathBuf,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserRegistry {
    /// Create a registry whose document ids are relative to the working directory.
    pub fn new() -> Self {
        Self {
            content_root: PathBuf::from("."),
        }
    }

    /// Create a registry whose document ids are relative to `root`.
    pub fn with_content_root(root: impl Into<PathBuf>) -> Self {
        Self {
            content_root: root.into(),
        }
    }

    /// Read and parse a document file.
    pub fn parse_file(&self, path: &Path) -> Result<SourceDocument> {
        let content = std::fs::read_to_string(path)?;
        self.parse(&content, path)
    }

    /// Parse document content, picking the reader from the file extension.
    pub fn parse(&self, content: &str, path: &Path) -> Result<SourceDocument> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ParserError::UnknownExtension("(none)".to_string()))?;

        let content_path = ContentPath::from_path(path, &self.content_root)
            .ok_or_else(|| ParserError::UnknownExtension(ext.to_string()))?;

        let (frontmatter, body) = match content_path.content_type {
            ContentType::Markup => parse_markup_document(content, path)?,
            ContentType::Json => parse_json_document(content, path)?,
        };

        tracing::debug!(id = %content_path.id, title = %frontmatter.title, "parsed document");

        Ok(SourceDocument {
            id: content_path.id,
            frontmatter,
            body,
        })
    }
}

fn parse_markup_document(content: &str, path: &Path) -> Result<(Frontmatter, Node)> {
    let (frontmatter, body) = parse_frontmatter(content, path)?;
    let children = parse_markup(body).map_err(|source| ParserError::Markup {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((frontmatter, Node::new(ROOT_TAG).with_children(children)))
}

fn parse_json_document(content: &str, path: &Path) -> Result<(Frontmatter, Node)> {
    let doc: JsonDocument = serde_json::from_str(content).map_err(|source| ParserError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((doc.meta, doc.body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_markup() {
        let registry = ParserRegistry::new();
        let content = r#"---
title: "Test"
date: "2015-12-19"
---

◊section{Hello}"#;

        let doc = registry.parse(content, Path::new("posts/test.pm")).unwrap();
        assert_eq!(doc.id, "posts/test.html");
        assert_eq!(doc.frontmatter.title, "Test");
        assert_eq!(doc.body.tag, ROOT_TAG);
        assert!(doc.body.children[0].is_tag("section"));
    }

    #[test]
    fn test_registry_json() {
        let registry = ParserRegistry::new();
        let content = r#"{"meta": {"title": "Tree", "tags": ["a"]},
                          "body": {"tag": "root", "children": ["text"]}}"#;

        let doc = registry.parse(content, Path::new("tree.json")).unwrap();
        assert_eq!(doc.id, "tree.html");
        assert_eq!(doc.frontmatter.tags, vec!["a"]);
        assert_eq!(doc.body.text_content(), "text");
    }

    #[test]
    fn test_registry_unknown_extension() {
        let registry = ParserRegistry::new();
        let result = registry.parse("content", Path::new("test.xyz"));
        assert!(matches!(result, Err(ParserError::UnknownExtension(_))));

        let result = registry.parse("content", Path::new("README"));
        assert!(matches!(result, Err(ParserError::UnknownExtension(_))));
    }

    #[test]
    fn test_markup_error_carries_path() {
        let registry = ParserRegistry::new();
        let err = registry
            .parse("◊em{open", Path::new("broken.pm"))
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("broken.pm"));
        assert!(msg.contains("unclosed"));
    }

    #[test]
    fn test_parse_file_with_content_root() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let post = dir.path().join("posts");
        std::fs::create_dir_all(&post).expect("mkdir");
        let file = post.join("hello.pm");
        std::fs::write(&file, "+++\ntitle = \"Hello\"\n+++\nBody ◊em{text}.").expect("write");

        let registry = ParserRegistry::with_content_root(dir.path());
        let doc = registry.parse_file(&file).expect("parse");
        assert_eq!(doc.id, "posts/hello.html");
        assert_eq!(doc.title(), "Hello");
        assert_eq!(doc.body.text_content(), "Body text.");
    }
}
