//! Error types for editor operations.

use thiserror::Error;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur in editor operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Scene or session serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An uploaded file was not an image.
    #[error("Unsupported media type: {0}")]
    UnsupportedMime(String),

    /// An image asset has no usable pixel size.
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Reported width in pixels.
        width: u32,
        /// Reported height in pixels.
        height: u32,
    },
}
