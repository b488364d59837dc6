//! Check command - validate configuration and documents

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, bail};
use sidenote_core::{Config, Target};
use sidenote_decoder::IdSource;
use sidenote_generator::Renderer;
use sidenote_parser::ParserRegistry;

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates the configuration and every named document.
pub fn run(config_path: &Path, files: &[PathBuf], strict: bool) -> Result<()> {
    tracing::info!(
        ?config_path,
        count = files.len(),
        strict,
        "Checking configuration and documents"
    );

    let result = validate(config_path, files);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

fn validate(config_path: &Path, files: &[PathBuf]) -> ValidationResult {
    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    if !config_path.exists() {
        result.add_warning(format!(
            "Configuration file {} not found, using defaults",
            config_path.display()
        ));
    }
    let config = match Config::load_or_default(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            Config::default()
        }
    };

    if files.is_empty() {
        result.add_warning("No documents given");
        return result;
    }

    println!("\nChecking documents...");
    let parser = ParserRegistry::new();
    let renderer = Renderer::new(config);
    for file in files {
        validate_document(&parser, &renderer, file, &mut result);
    }

    result
}

fn validate_document(
    parser: &ParserRegistry,
    renderer: &Renderer,
    file: &Path,
    result: &mut ValidationResult,
) {
    let document = match parser.parse_file(file) {
        Ok(document) => document,
        Err(e) => {
            result.add_error(format!("{}: {e}", file.display()));
            println!("  ✗ {}", file.display());
            return;
        }
    };

    let frontmatter = &document.frontmatter;
    if let Err(e) = frontmatter.validate(file) {
        result.add_error(format!("{}: {e}", file.display()));
        println!("  ✗ {}", file.display());
        return;
    }

    if frontmatter.date.is_none() {
        result.add_warning(format!("{}: no publication date", file.display()));
    }
    if frontmatter.draft {
        result.add_warning(format!("{}: marked as draft", file.display()));
    }

    // Decoding never fails; a trial run surfaces handler warnings in the log.
    let mut ids = IdSource::new();
    for target in [Target::Html, Target::Ltx] {
        if let Err(e) = renderer.render(&document, target, &mut ids) {
            result.add_error(format!("{}: {e}", file.display()));
        }
    }

    println!("  ✓ {}", file.display());
}
