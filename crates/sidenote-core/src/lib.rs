//! Sidenote Core Library
//!
//! Document tree, output targets, metadata, configuration and error handling
//! shared by the Sidenote crates.

pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;
pub mod node;
pub mod pubdate;
pub mod target;

pub use config::Config;
pub use content::{ContentPath, ContentType, SourceDocument};
pub use error::{CoreError, Result};
pub use frontmatter::Frontmatter;
pub use node::{Attrs, Child, Node};
pub use pubdate::{PubDate, pubdate_to_english};
pub use target::Target;
