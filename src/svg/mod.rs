//! SVG normalization engine.
//!
//! ```text
//! raw bytes ──► document (arena tree) ──► normalize (ordered cleanup steps) ──► writer
//! ```

pub mod document;
pub mod error;
pub mod geometry;
pub mod normalize;
pub mod writer;

pub use document::{Document, SVG_NS};
pub use error::SvgError;
pub use normalize::{NormalizeOptions, Normalizer, Outcome, SizePolicy, SkipReason};
