//! Content types and structures.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{frontmatter::Frontmatter, node::Node};

/// Type of content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Lozenge markup with optional frontmatter (.pm files).
    Markup,
    /// A pre-parsed tree with metadata (.json files).
    Json,
}

impl ContentType {
    /// Determine content type from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pm" | "poly" => Some(Self::Markup),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Get the file extension for this content type.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markup => "pm",
            Self::Json => "json",
        }
    }
}

/// A source path with its derived document id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPath {
    /// Original file path.
    pub path: PathBuf,

    /// Document id: the path relative to the content root, with the
    /// extension replaced by `.html`. Index links point at `<id>#<entry>`.
    pub id: String,

    /// Content type based on extension.
    pub content_type: ContentType,
}

impl ContentPath {
    /// Derive the id and content type of `path`.
    ///
    /// - `posts/hello.pm` under root `.` → `posts/hello.html`
    /// - `/site/content/about.json` under root `/site/content` → `about.html`
    pub fn from_path(path: &Path, content_root: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        let content_type = ContentType::from_extension(extension)?;

        let relative = path.strip_prefix(content_root).unwrap_or(path);
        let id = relative
            .with_extension("html")
            .to_string_lossy()
            .replace('\\', "/")
            .trim_start_matches("./")
            .trim_start_matches('/')
            .to_string();

        Some(Self {
            path: path.to_path_buf(),
            id,
            content_type,
        })
    }
}

/// A parsed source document: metadata plus its undecoded tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    /// Document id (see [`ContentPath::id`]).
    pub id: String,

    /// Parsed frontmatter metadata.
    pub frontmatter: Frontmatter,

    /// Root of the document tree.
    pub body: Node,
}

impl SourceDocument {
    /// Title from the frontmatter, falling back to the id.
    pub fn title(&self) -> &str {
        if self.frontmatter.title.is_empty() {
            &self.id
        } else {
            &self.frontmatter.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(ContentType::from_extension("pm"), Some(ContentType::Markup));
        assert_eq!(ContentType::from_extension("PM"), Some(ContentType::Markup));
        assert_eq!(ContentType::from_extension("json"), Some(ContentType::Json));
        assert_eq!(ContentType::from_extension("md"), None);
    }

    #[test]
    fn test_content_path_ids() {
        let cp = ContentPath::from_path(Path::new("posts/hello.pm"), Path::new(".")).unwrap();
        assert_eq!(cp.id, "posts/hello.html");
        assert_eq!(cp.content_type, ContentType::Markup);

        let cp = ContentPath::from_path(
            Path::new("/site/content/about.json"),
            Path::new("/site/content"),
        )
        .unwrap();
        assert_eq!(cp.id, "about.html");
        assert_eq!(cp.content_type, ContentType::Json);

        let cp = ContentPath::from_path(Path::new("./notes/a.pm"), Path::new("/elsewhere")).unwrap();
        assert_eq!(cp.id, "notes/a.html");

        assert!(ContentPath::from_path(Path::new("notes/a.txt"), Path::new(".")).is_none());
    }

    #[test]
    fn test_title_fallback() {
        let doc = SourceDocument {
            id: "a.html".into(),
            frontmatter: Frontmatter::default(),
            body: Node::new("root"),
        };
        assert_eq!(doc.title(), "a.html");
    }
}
