//! Error types for docoutline library.

use std::io;
use thiserror::Error;

/// Result type alias for docoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building a document outline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Layout input could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A page reported a non-positive or non-finite size.
    #[error("invalid page geometry on page {page}: {width} x {height}")]
    InvalidPageGeometry {
        /// Page number (1-indexed)
        page: u32,
        /// Reported width in points
        width: f32,
        /// Reported height in points
        height: f32,
    },

    /// A single line could not be extracted from a page.
    ///
    /// Produced by page sources; the collector counts and skips these.
    #[error("Fragment extraction error: {0}")]
    FragmentExtract(String),

    /// An option value is outside its accepted range.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}
