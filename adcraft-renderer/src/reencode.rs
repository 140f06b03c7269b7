//! Re-encoding of client-rendered canvases.
//!
//! The browser editor flattens its canvas to a raster `data:` URL and posts
//! it for download. These helpers decode that URL and produce the requested
//! PNG, JPEG or PDF bytes.

use std::fmt;
use std::str::FromStr;

use adcraft_core::is_image_mime;

use crate::datauri::DataUrl;
use crate::error::{RenderError, RenderResult};
use crate::export::{encode_jpeg, encode_pdf, flatten_rgba};

/// JPEG quality for downloads.
pub const DOWNLOAD_JPEG_QUALITY: u8 = 92;

/// Raster download formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageExportFormat {
    /// PNG, lossless with alpha.
    #[default]
    Png,
    /// JPEG, alpha flattened onto white.
    Jpg,
}

impl ImageExportFormat {
    /// MIME type of the encoded output.
    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpg => "image/jpeg",
        }
    }

    /// File extension used in download names.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
        }
    }
}

impl FromStr for ImageExportFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            other => Err(RenderError::Export(format!("unsupported image format: {other}"))),
        }
    }
}

impl fmt::Display for ImageExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Decode a raster data URL and re-encode it as `format`.
///
/// # Errors
///
/// Returns an error if the URL is malformed, is not an image, or cannot be
/// decoded or encoded.
pub fn export_image_from_data_url(data_url: &str, format: ImageExportFormat) -> RenderResult<Vec<u8>> {
    let decoded = decode_raster(data_url)?;

    match format {
        ImageExportFormat::Png => {
            let mut buf = std::io::Cursor::new(Vec::new());
            decoded
                .write_to(&mut buf, image::ImageFormat::Png)
                .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))?;
            Ok(buf.into_inner())
        }
        ImageExportFormat::Jpg => {
            let rgba = decoded.to_rgba8();
            let rgb = flatten_rgba(rgba.as_raw(), [255, 255, 255]);
            encode_jpeg(&rgb, rgba.width(), rgba.height(), DOWNLOAD_JPEG_QUALITY)
        }
    }
}

/// Decode a raster data URL and wrap it in a single-page PDF.
///
/// # Errors
///
/// Returns an error if the URL is malformed, is not an image, or the PDF
/// cannot be written.
pub fn export_pdf_from_data_url(data_url: &str, dpi: f32) -> RenderResult<Vec<u8>> {
    let decoded = decode_raster(data_url)?;

    // printpdf embeds without alpha; flatten first.
    let rgba = decoded.to_rgba8();
    let rgb = flatten_rgba(rgba.as_raw(), [255, 255, 255]);
    let flat = image::RgbImage::from_raw(rgba.width(), rgba.height(), rgb)
        .ok_or_else(|| RenderError::Export("pixel buffer size mismatch".to_string()))?;

    let mut png = std::io::Cursor::new(Vec::new());
    flat.write_to(&mut png, image::ImageFormat::Png)
        .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))?;

    encode_pdf(&png.into_inner(), dpi)
}

fn decode_raster(data_url: &str) -> RenderResult<image::DynamicImage> {
    let url = DataUrl::parse(data_url)?;
    if !is_image_mime(&url.mime) {
        return Err(RenderError::UnsupportedMime(url.mime));
    }
    let decoded = image::load_from_memory(&url.bytes)
        .map_err(|e| RenderError::Resource(format!("image decode failed: {e}")))?;
    tracing::debug!(
        "Decoded {} canvas {}x{}",
        url.mime,
        decoded.width(),
        decoded.height()
    );
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba_data_url(pixel: [u8; 4]) -> String {
        let img = image::RgbaImage::from_pixel(4, 3, image::Rgba(pixel));
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).expect("encode");
        DataUrl::encode("image/png", &buf.into_inner())
    }

    #[test]
    fn format_names() {
        assert_eq!("png".parse::<ImageExportFormat>().expect("png"), ImageExportFormat::Png);
        assert_eq!("JPG".parse::<ImageExportFormat>().expect("jpg"), ImageExportFormat::Jpg);
        assert_eq!("jpeg".parse::<ImageExportFormat>().expect("jpeg"), ImageExportFormat::Jpg);
        assert!("gif".parse::<ImageExportFormat>().is_err());
        assert_eq!(ImageExportFormat::Jpg.mime(), "image/jpeg");
    }

    #[test]
    fn png_keeps_dimensions() {
        let bytes = export_image_from_data_url(&rgba_data_url([1, 2, 3, 255]), ImageExportFormat::Png)
            .expect("png");
        assert_eq!(&bytes[0..4], &[137, 80, 78, 71]);
        let decoded = image::load_from_memory(&bytes).expect("decode");
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
    }

    #[test]
    fn jpeg_flattens_transparency_to_white() {
        let bytes = export_image_from_data_url(&rgba_data_url([0, 0, 0, 0]), ImageExportFormat::Jpg)
            .expect("jpg");
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
        let decoded = image::load_from_memory(&bytes).expect("decode").to_rgb8();
        let pixel = decoded.get_pixel(1, 1);
        assert!(pixel.0.iter().all(|&c| c > 240), "{pixel:?}");
    }

    #[test]
    fn pdf_has_header() {
        let pdf = export_pdf_from_data_url(&rgba_data_url([200, 10, 10, 255]), 96.0).expect("pdf");
        assert_eq!(&pdf[0..5], b"%PDF-");
    }

    #[test]
    fn rejects_non_image_urls() {
        let err = export_image_from_data_url("data:text/plain,hello", ImageExportFormat::Png)
            .expect_err("not an image");
        assert!(matches!(err, RenderError::UnsupportedMime(_)));

        let err = export_pdf_from_data_url("data:image/png;base64,AAAA", 96.0).expect_err("garbage");
        assert!(matches!(err, RenderError::Resource(_)));

        assert!(export_image_from_data_url("nope", ImageExportFormat::Png).is_err());
    }
}
