//! Sidenote CLI Library
//!
//! This library provides the command implementations for the Sidenote CLI.
//! It is used by the binary entry point and can be driven directly from
//! other tools.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (render, index, check)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use sidenote::cmd;
//!
//! // Render a post to LaTeX on stdout
//! cmd::render::run(
//!     Path::new("sidenote.toml"),
//!     Path::new("posts/tufte.pm"),
//!     Some(sidenote_core::Target::Ltx),
//!     None,
//!     Path::new("."),
//! )
//! .unwrap();
//! ```

pub mod cmd;

// Re-export core types for convenience
pub use sidenote_core::{Config, Target};
pub use sidenote_generator::{KeywordIndex, Renderer};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
///
/// Logs go to stderr so rendered output on stdout stays clean.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
