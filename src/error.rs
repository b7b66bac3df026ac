//! Error types for folio operations.
//!
//! Almost every failure in this pipeline is silent by design: disallowed
//! markup is stripped, unresolvable image clicks are no-ops, empty outlines
//! are valid. The only hard error is a programmer-facing one.

use thiserror::Error;

/// Errors that can occur when driving the enrichment pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A lightbox was asked to open at an index past the article's images.
    #[error("image index {index} out of range for {count} image(s)")]
    ImageIndexOutOfRange { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
