//! Sidenote Generator Library
//!
//! Turns parsed documents into output.
//!
//! # Modules
//!
//! - [`render`] - Per-document rendering: publication date plus decoded body
//! - [`index`] - Cross-document keyword index

pub mod index;
pub mod render;

pub use index::{IndexGroup, IndexLink, IndexSource, KeywordIndex};
pub use render::{DocumentMeta, RenderError, RenderedDocument, Renderer};
