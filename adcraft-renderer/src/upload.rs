//! Upload decoding.
//!
//! Turns a picked file into an [`ImageAsset`]: MIME gate, format sniffing,
//! decode to learn the natural size, optional downscale of oversized images,
//! and a `data:` URL for embedding in the scene.

use std::io::Cursor;

use adcraft_core::{is_image_mime, ImageAsset, PendingUpload};

use crate::datauri::DataUrl;
use crate::error::{RenderError, RenderResult};

/// Uploads larger than this on either side are downscaled.
pub const DEFAULT_MAX_DIMENSION: u32 = 2048;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG with alpha support.
    Png,
    /// JPEG (no alpha).
    Jpeg,
    /// WebP (alpha support).
    WebP,
    /// GIF (first frame only).
    Gif,
    /// Unknown/other format.
    Unknown,
}

impl ImageFormat {
    /// Detect format from file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "png" => Self::Png,
            "jpg" | "jpeg" => Self::Jpeg,
            "webp" => Self::WebP,
            "gif" => Self::Gif,
            _ => Self::Unknown,
        }
    }

    /// Detect format from MIME type.
    #[must_use]
    pub fn from_mime(mime: &str) -> Self {
        match mime.to_lowercase().as_str() {
            "image/png" => Self::Png,
            "image/jpeg" | "image/jpg" => Self::Jpeg,
            "image/webp" => Self::WebP,
            "image/gif" => Self::Gif,
            _ => Self::Unknown,
        }
    }

    /// Detect format from magic bytes.
    #[must_use]
    pub fn from_magic_bytes(data: &[u8]) -> Self {
        if data.len() < 4 {
            return Self::Unknown;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Self::Png;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Self::Jpeg;
        }

        // GIF: "GIF8"
        if data.starts_with(b"GIF8") {
            return Self::Gif;
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Self::WebP;
        }

        Self::Unknown
    }

    /// Canonical MIME type, if known.
    #[must_use]
    pub fn mime(self) -> Option<&'static str> {
        match self {
            Self::Png => Some("image/png"),
            Self::Jpeg => Some("image/jpeg"),
            Self::WebP => Some("image/webp"),
            Self::Gif => Some("image/gif"),
            Self::Unknown => None,
        }
    }
}

/// Decodes uploaded files into assets.
#[derive(Debug, Clone)]
pub struct UploadDecoder {
    max_dimension: u32,
}

impl UploadDecoder {
    /// Create a decoder that downscales images larger than `max_dimension`.
    #[must_use]
    pub fn new(max_dimension: u32) -> Self {
        Self {
            max_dimension: max_dimension.max(1),
        }
    }

    /// Decode a file with its declared MIME type.
    ///
    /// The declared type only gates the upload; the stored MIME type comes
    /// from the file's magic bytes when they are recognised.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnsupportedMime`] for non-image types and
    /// [`RenderError::Resource`] if the bytes cannot be decoded.
    pub fn decode(&self, declared_mime: &str, bytes: &[u8]) -> RenderResult<ImageAsset> {
        if !is_image_mime(declared_mime) {
            return Err(RenderError::UnsupportedMime(declared_mime.to_string()));
        }

        let format = ImageFormat::from_magic_bytes(bytes);
        let img = image::load_from_memory(bytes)
            .map_err(|e| RenderError::Resource(format!("Failed to decode image: {e}")))?;

        let (width, height) = (img.width(), img.height());
        if width <= self.max_dimension && height <= self.max_dimension {
            let mime = format
                .mime()
                .unwrap_or_else(|| declared_mime.trim())
                .to_ascii_lowercase();
            let data_url = DataUrl::encode(&mime, bytes);
            return Ok(ImageAsset::new(mime, width, height, data_url)?);
        }

        let resized = img.resize(
            self.max_dimension,
            self.max_dimension,
            image::imageops::FilterType::Lanczos3,
        );
        tracing::debug!(
            "Downscaled upload from {width}x{height} to {}x{}",
            resized.width(),
            resized.height()
        );

        let mut buf = Cursor::new(Vec::new());
        resized
            .write_to(&mut buf, image::ImageFormat::Png)
            .map_err(|e| RenderError::Resource(format!("Failed to re-encode image: {e}")))?;
        let png = buf.into_inner();

        Ok(ImageAsset::new(
            "image/png",
            resized.width(),
            resized.height(),
            DataUrl::encode("image/png", &png),
        )?)
    }

    /// Decode the file carried by a pending upload ticket.
    ///
    /// # Errors
    ///
    /// See [`UploadDecoder::decode`].
    pub fn decode_pending(&self, pending: &PendingUpload) -> RenderResult<ImageAsset> {
        tracing::debug!(
            "Decoding upload #{} '{}' ({} bytes)",
            pending.ticket,
            pending.file.name,
            pending.file.bytes.len()
        );
        self.decode(&pending.file.mime, &pending.file.bytes)
    }

    /// Decode an image supplied as a `data:` URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or does not hold an image.
    pub fn decode_data_url(&self, uri: &str) -> RenderResult<ImageAsset> {
        let url = DataUrl::parse(uri)?;
        self.decode(&url.mime, &url.bytes)
    }
}

impl Default for UploadDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DIMENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adcraft_core::{FileSelection, ImageSlot};

    // 1x1 red pixel
    const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

    fn png_bytes() -> Vec<u8> {
        DataUrl::parse(&format!("data:image/png;base64,{PNG_1X1}"))
            .expect("fixture")
            .bytes
    }

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([0, 128, 255, 255]));
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .expect("encode");
        buf.into_inner()
    }

    #[test]
    fn test_format_detection_from_extension() {
        assert_eq!(ImageFormat::from_extension("png"), ImageFormat::Png);
        assert_eq!(ImageFormat::from_extension("PNG"), ImageFormat::Png);
        assert_eq!(ImageFormat::from_extension("jpg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("webp"), ImageFormat::WebP);
        assert_eq!(ImageFormat::from_extension("bmp"), ImageFormat::Unknown);
    }

    #[test]
    fn test_format_detection_from_magic_bytes() {
        assert_eq!(
            ImageFormat::from_magic_bytes(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            ImageFormat::Png
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]),
            ImageFormat::Jpeg
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(b"RIFF\x00\x00\x00\x00WEBP"),
            ImageFormat::WebP
        );
        assert_eq!(ImageFormat::from_magic_bytes(b"GIF89a"), ImageFormat::Gif);
        assert_eq!(ImageFormat::from_magic_bytes(&[0, 1]), ImageFormat::Unknown);
    }

    #[test]
    fn test_decode_png_upload() {
        let asset = UploadDecoder::default()
            .decode("image/png", &png_bytes())
            .expect("decode");
        assert_eq!((asset.width, asset.height), (1, 1));
        assert_eq!(asset.mime, "image/png");
        assert!(asset.data_url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_declared_mime_only_gates() {
        let asset = UploadDecoder::default()
            .decode("image/jpeg", &png_bytes())
            .expect("decode");
        assert_eq!(asset.mime, "image/png");
    }

    #[test]
    fn test_non_image_mime_rejected() {
        let err = UploadDecoder::default()
            .decode("application/pdf", &png_bytes())
            .expect_err("should reject");
        assert!(matches!(err, RenderError::UnsupportedMime(_)));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let err = UploadDecoder::default()
            .decode("image/png", b"definitely not a png")
            .expect_err("should fail");
        assert!(matches!(err, RenderError::Resource(_)));
    }

    #[test]
    fn test_oversized_upload_is_downscaled() {
        let asset = UploadDecoder::new(16)
            .decode("image/png", &encoded_png(64, 32))
            .expect("decode");
        assert_eq!((asset.width, asset.height), (16, 8));
    }

    #[test]
    fn test_decode_pending_ticket() {
        let pending = PendingUpload {
            ticket: 3,
            slot: ImageSlot::Logo,
            file: FileSelection {
                name: "logo.png".to_string(),
                mime: "image/png".to_string(),
                bytes: encoded_png(4, 2),
            },
        };
        let asset = UploadDecoder::default()
            .decode_pending(&pending)
            .expect("decode");
        assert_eq!((asset.width, asset.height), (4, 2));
    }

    #[test]
    fn test_decode_data_url() {
        let asset = UploadDecoder::default()
            .decode_data_url(&format!("data:image/png;base64,{PNG_1X1}"))
            .expect("decode");
        assert_eq!(asset.width, 1);
        assert!(UploadDecoder::default().decode_data_url("data:image/png").is_err());
    }
}
