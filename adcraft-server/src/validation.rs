//! Input validation for untrusted data.
//!
//! Uploads and posted canvases are checked here before any decoding
//! work is scheduled.

use adcraft_core::is_image_mime;
use thiserror::Error;

/// Longest accepted file name.
pub const MAX_FILE_NAME_LEN: usize = 255;

/// Validation error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// No file was supplied.
    #[error("no file provided")]
    MissingFile,
    /// The upload was empty.
    #[error("file is empty")]
    EmptyFile,
    /// The upload exceeds the configured cap.
    #[error("file too large ({size} bytes, max {max})")]
    FileTooLarge {
        /// Actual size.
        size: usize,
        /// Configured cap.
        max: usize,
    },
    /// The file is not an image.
    #[error("file must be an image, got {0}")]
    NotAnImage(String),
    /// The file name is too long or contains path separators.
    #[error("invalid file name")]
    InvalidFileName,
    /// The posted canvas is not a `data:` URL.
    #[error("imageData must be a data URL")]
    NotADataUrl,
    /// The posted canvas exceeds the configured cap.
    #[error("imageData too large ({size} bytes, max {max})")]
    DataUrlTooLarge {
        /// Actual length.
        size: usize,
        /// Configured cap.
        max: usize,
    },
}

impl ValidationError {
    /// Short label used for metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingFile => "missing_file",
            Self::EmptyFile => "empty_file",
            Self::FileTooLarge { .. } => "file_too_large",
            Self::NotAnImage(_) => "not_an_image",
            Self::InvalidFileName => "file_name",
            Self::NotADataUrl => "not_a_data_url",
            Self::DataUrlTooLarge { .. } => "data_url_too_large",
        }
    }
}

/// Validate an uploaded file before decoding.
///
/// # Errors
///
/// Returns an error if the file is empty, too large, not an image or has
/// an unusable name.
pub fn validate_upload(
    file_name: Option<&str>,
    mime: &str,
    size: usize,
    max: usize,
) -> Result<(), ValidationError> {
    if let Some(name) = file_name {
        validate_file_name(name)?;
    }
    if !is_image_mime(mime) {
        return Err(ValidationError::NotAnImage(mime.to_string()));
    }
    if size == 0 {
        return Err(ValidationError::EmptyFile);
    }
    if size > max {
        return Err(ValidationError::FileTooLarge { size, max });
    }
    Ok(())
}

/// Validate a client-supplied file name.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidFileName`] for names that are too long
/// or contain path separators or control characters.
pub fn validate_file_name(name: &str) -> Result<(), ValidationError> {
    if name.len() > MAX_FILE_NAME_LEN
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control)
    {
        return Err(ValidationError::InvalidFileName);
    }
    Ok(())
}

/// Validate a posted canvas `data:` URL.
///
/// # Errors
///
/// Returns an error if the string is not a data URL or exceeds `max` bytes.
pub fn validate_data_url(data_url: &str, max: usize) -> Result<(), ValidationError> {
    if !data_url.starts_with("data:") {
        return Err(ValidationError::NotADataUrl);
    }
    if data_url.len() > max {
        return Err(ValidationError::DataUrlTooLarge {
            size: data_url.len(),
            max,
        });
    }
    Ok(())
}
