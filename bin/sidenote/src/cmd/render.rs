//! Render command - decode one document for a target

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use sidenote_core::{Config, Target};
use sidenote_decoder::IdSource;
use sidenote_generator::Renderer;
use sidenote_parser::ParserRegistry;

use super::{load_config, write_output};

/// Run the render command.
///
/// Parses `file`, decodes it for `target` (or the configured target) and
/// writes the result to `output` or stdout.
pub fn run(
    config_path: &Path,
    file: &Path,
    target: Option<Target>,
    output: Option<&Path>,
    content_root: &Path,
) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?file, ?target, ?output, "Starting render");

    let config = load_config(config_path)?;
    let text = render_to_string(config, file, target, content_root)?;
    write_output(output, &text)?;

    tracing::info!(elapsed_ms = start.elapsed().as_millis() as u64, "Render finished");
    Ok(())
}

/// Render `file` and return the output text.
pub fn render_to_string(
    config: Config,
    file: &Path,
    target: Option<Target>,
    content_root: &Path,
) -> Result<String> {
    let parser = ParserRegistry::with_content_root(content_root);
    let document = parser
        .parse_file(file)
        .wrap_err_with(|| format!("Failed to parse {}", file.display()))?;

    let renderer = Renderer::new(config);
    let target = target.unwrap_or_else(|| renderer.default_target());
    let mut ids = IdSource::new();
    let rendered = renderer
        .render(&document, target, &mut ids)
        .wrap_err_with(|| format!("Failed to render {}", file.display()))?;

    Ok(rendered.output.render())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const POST: &str = "---\ntitle: \"Hello\"\ndate: \"2015-12-19\"\n---\nA ◊em{fine} day.\n";

    #[test]
    fn test_render_html_and_latex() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("hello.pm");
        fs::write(&file, POST).unwrap();

        let html =
            render_to_string(Config::default(), &file, Some(Target::Html), dir.path()).unwrap();
        assert_eq!(html, "<body>A <em>fine</em> day.\n</body>");

        let latex =
            render_to_string(Config::default(), &file, Some(Target::Ltx), dir.path()).unwrap();
        assert_eq!(latex, "A \\emph{fine} day.\n");
    }

    #[test]
    fn test_configured_target_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("hello.pm");
        fs::write(&file, POST).unwrap();

        let mut config = Config::default();
        config.render.target = Target::Pdf;
        let out = render_to_string(config, &file, None, dir.path()).unwrap();
        assert!(out.contains("\\emph{fine}"));
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("hello.pm");
        fs::write(&file, POST).unwrap();
        let output = dir.path().join("out/hello.tex");

        run(
            &dir.path().join("missing.toml"),
            &file,
            Some(Target::Ltx),
            Some(&output),
            dir.path(),
        )
        .unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "A \\emph{fine} day.\n");
    }

    #[test]
    fn test_bad_date_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.pm");
        fs::write(&file, "---\ntitle: \"Bad\"\ndate: \"soon\"\n---\nText").unwrap();

        let err = render_to_string(Config::default(), &file, None, dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("soon"));
    }
}
