//! Error types for histogram view operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, rendering, or resetting a histogram view.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad construction arguments (empty bins, zero dimensions, non-finite counts).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The host document has no container with the requested identifier.
    #[error("Container '{id}' not found in document")]
    ContainerMissing {
        /// Identifier that was looked up.
        id: String,
    },

    /// Render data is not aligned with the bin count.
    #[error("Data length mismatch: expected {expected} values (one per bin), got {actual}")]
    LengthMismatch {
        /// Number of bins.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// The rendering engine failed to create or redraw a chart.
    #[error("Rendering engine error: {0}")]
    Engine(String),

    /// The host environment (browser document, canvas API) raised an error.
    #[error("Host error: {0}")]
    Host(String),

    /// I/O error (snapshot files, configuration files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Configuration parse error with the offending line.
    #[error("Config parse error at line {line}: {message}")]
    ConfigParse {
        /// Line number (1-based, 0 when unknown).
        line: usize,
        /// Parser message.
        message: String,
    },
}
