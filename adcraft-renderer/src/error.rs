//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering, decoding and export.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Resource loading or decoding failed.
    #[error("Failed to load resource: {0}")]
    Resource(String),

    /// A file was not an image.
    #[error("Unsupported media type: {0}")]
    UnsupportedMime(String),

    /// A `data:` URL could not be parsed.
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// Export to an output format failed.
    #[error("Export failed: {0}")]
    Export(String),
}

impl From<adcraft_core::EditorError> for RenderError {
    fn from(err: adcraft_core::EditorError) -> Self {
        match err {
            adcraft_core::EditorError::UnsupportedMime(mime) => Self::UnsupportedMime(mime),
            other => Self::Resource(other.to_string()),
        }
    }
}
