//! Index command - build the keyword index over several documents

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use sidenote_core::{Config, ContentPath, Target};
use sidenote_decoder::{IdSource, to_html};
use sidenote_generator::{IndexSource, KeywordIndex, RenderedDocument, Renderer};
use sidenote_parser::ParserRegistry;

use super::{load_config, write_output};

/// Output format of the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum IndexFormat {
    /// `[{keyword, links}]` groups
    Json,
    /// An HTML fragment
    Html,
}

/// A document as seen by the index: rendered, or only named.
struct Entry {
    id: String,
    title: String,
    rendered: Option<RenderedDocument>,
}

/// Run the index command.
pub fn run(
    config_path: &Path,
    files: &[PathBuf],
    format: IndexFormat,
    output: Option<&Path>,
    content_root: &Path,
) -> Result<()> {
    tracing::info!(count = files.len(), ?format, ?output, "Building keyword index");

    let config = load_config(config_path)?;
    let text = index_to_string(config, files, format, content_root)?;
    write_output(output, &text)
}

/// Build the index for `files` and serialize it.
///
/// Documents that fail to parse or render stay in the index as placeholders.
pub fn index_to_string(
    config: Config,
    files: &[PathBuf],
    format: IndexFormat,
    content_root: &Path,
) -> Result<String> {
    let parser = ParserRegistry::with_content_root(content_root);
    let renderer = Renderer::new(config);
    let mut ids = IdSource::new();

    let entries: Vec<Entry> = files
        .iter()
        .map(|file| load_entry(&parser, &renderer, &mut ids, file, content_root))
        .collect();

    let sources: Vec<IndexSource<'_>> = entries
        .iter()
        .map(|entry| IndexSource {
            id: &entry.id,
            title: &entry.title,
            body: entry.rendered.as_ref().and_then(|doc| doc.output.as_html()),
        })
        .collect();

    let index = KeywordIndex::build(&sources);
    tracing::info!(
        headings = index.headings().len(),
        placeholders = index.placeholders().len(),
        "Index built"
    );

    match format {
        IndexFormat::Json => {
            serde_json::to_string_pretty(&index).wrap_err("Failed to serialize index")
        }
        IndexFormat::Html => Ok(to_html(&index.to_node(&renderer.config().index.title))),
    }
}

fn load_entry(
    parser: &ParserRegistry,
    renderer: &Renderer,
    ids: &mut IdSource,
    file: &Path,
    content_root: &Path,
) -> Entry {
    let document = match parser.parse_file(file) {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!(path = %file.display(), error = %e, "failed to parse document");
            let id = ContentPath::from_path(file, content_root)
                .map(|p| p.id)
                .unwrap_or_else(|| file.display().to_string());
            return Entry {
                title: id.clone(),
                id,
                rendered: None,
            };
        }
    };

    let rendered = match renderer.render(&document, Target::Html, ids) {
        Ok(rendered) => Some(rendered),
        Err(e) => {
            tracing::warn!(id = %document.id, error = %e, "failed to render document");
            None
        }
    };

    Entry {
        id: document.id.clone(),
        title: document.title().to_string(),
        rendered,
    }
}
