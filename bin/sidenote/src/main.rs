//! Sidenote CLI
//!
//! Renders tagged-markup documents to Tufte-style HTML or LaTeX.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use sidenote::cmd::index::IndexFormat;
use sidenote_core::Target;

/// Command-line interface for Sidenote.
#[derive(Parser)]
#[command(
    name = "sidenote",
    version,
    about = "Render tagged-markup blog posts to HTML or LaTeX"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "sidenote.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Render one document
    Render {
        /// Source document (.pm or .json)
        file: PathBuf,
        /// Output target (html, ltx, pdf); defaults to the configured one
        #[arg(short, long)]
        target: Option<Target>,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Directory document ids are relative to
        #[arg(long, default_value = ".")]
        content_root: PathBuf,
    },
    /// Build the keyword index over several documents
    Index {
        /// Source documents, in index order
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = IndexFormat::Json)]
        format: IndexFormat,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Directory document ids are relative to
        #[arg(long, default_value = ".")]
        content_root: PathBuf,
    },
    /// Validate configuration and documents
    Check {
        /// Source documents to validate
        files: Vec<PathBuf>,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    sidenote::init_tracing(cli.verbose);

    match cli.command {
        Commands::Render {
            file,
            target,
            output,
            content_root,
        } => {
            sidenote::cmd::render::run(
                &cli.config,
                &file,
                target,
                output.as_deref(),
                &content_root,
            )?;
        }
        Commands::Index {
            files,
            format,
            output,
            content_root,
        } => {
            sidenote::cmd::index::run(
                &cli.config,
                &files,
                format,
                output.as_deref(),
                &content_root,
            )?;
        }
        Commands::Check { files, strict } => {
            sidenote::cmd::check::run(&cli.config, &files, strict)?;
        }
    }

    Ok(())
}
