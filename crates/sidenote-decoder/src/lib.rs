//! Sidenote Decoder
//!
//! Rewrites a document tree for an output target: tag handlers expand the
//! markup, then the HTML path detects paragraphs, splices margin constructs
//! and resolves links, while the LaTeX path resolves links, escapes prose and
//! flattens the tree to a string.

pub mod decode;
pub mod handlers;
pub mod html;
pub mod ids;
pub mod markers;
pub mod paragraphs;
pub mod text;

pub use decode::{DecodeOptions, Decoded, Decoder, decode};
pub use handlers::{Handler, HandlerContext, HandlerRegistry};
pub use html::{children_to_html, to_html};
pub use ids::IdSource;
