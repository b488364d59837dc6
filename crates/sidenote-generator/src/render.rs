//! Per-document rendering: metadata plus the decoded body.

use serde::Serialize;
use sidenote_core::{Config, CoreError, SourceDocument, Target};
use sidenote_decoder::{DecodeOptions, Decoded, Decoder, IdSource};
use thiserror::Error;
use tracing::{debug, info};

/// Rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Metadata error, such as a malformed publication date.
    #[error("{id}: {source}")]
    Metadata {
        id: String,
        #[source]
        source: CoreError,
    },
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// A rendered document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    /// Document id.
    pub id: String,

    /// Title, falling back to the id.
    pub title: String,

    /// Publication date in long English form.
    pub pubdate_english: Option<String>,

    /// Tags from the frontmatter.
    pub tags: Vec<String>,

    /// Decoded body.
    pub output: Decoded,
}

/// Metadata emitted next to a rendered body.
#[derive(Debug, Serialize)]
pub struct DocumentMeta<'a> {
    pub id: &'a str,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<&'a str>,
    #[serde(skip_serializing_if = "no_tags")]
    pub tags: &'a [String],
}

fn no_tags(tags: &&[String]) -> bool {
    tags.is_empty()
}

impl RenderedDocument {
    /// Serializable metadata view.
    pub fn meta(&self) -> DocumentMeta<'_> {
        DocumentMeta {
            id: &self.id,
            title: &self.title,
            date: self.pubdate_english.as_deref(),
            tags: &self.tags,
        }
    }
}

/// Renders source documents for one target at a time.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: Config,
    decoder: Decoder,
}

impl Renderer {
    /// Create a renderer with the default handlers, honouring the render
    /// settings in `config`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let decoder = Decoder::new().with_options(DecodeOptions {
            smart_typography: config.render.smart_typography,
        });
        Self { config, decoder }
    }

    /// Replace the decoder, e.g. one with extra handlers registered.
    #[must_use]
    pub fn with_decoder(mut self, decoder: Decoder) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Target used when the caller does not pick one.
    pub fn default_target(&self) -> Target {
        self.config.render.target
    }

    /// Render one document.
    ///
    /// `ids` must be shared by every document rendered in the same run.
    pub fn render(
        &self,
        document: &SourceDocument,
        target: Target,
        ids: &mut IdSource,
    ) -> Result<RenderedDocument> {
        let pubdate = document
            .frontmatter
            .pubdate()
            .map_err(|source| RenderError::Metadata {
                id: document.id.clone(),
                source,
            })?;

        if document.frontmatter.draft {
            debug!(id = %document.id, "rendering draft");
        }

        let output = self.decoder.decode(document.body.clone(), target, ids);
        info!(id = %document.id, output = %target, "rendered document");

        Ok(RenderedDocument {
            id: document.id.clone(),
            title: document.title().to_string(),
            pubdate_english: pubdate.map(|date| date.english()),
            tags: document.frontmatter.tags.clone(),
            output,
        })
    }
}
