//! Scene export to image and document formats.
//!
//! Renders a [`Scene`] to PNG, JPEG, SVG or PDF using the SVG document from
//! [`crate::svg`] as the intermediate representation and the resvg/tiny-skia
//! rasterization pipeline.

use std::sync::Arc;

use adcraft_core::Scene;
use image::ImageEncoder;

use crate::datauri::DataUrl;
use crate::error::{RenderError, RenderResult};
use crate::svg::scene_to_svg;

/// Default export multiplier.
pub const DEFAULT_EXPORT_SCALE: f32 = 2.0;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
    /// SVG vector graphics (returns the SVG XML string as UTF-8 bytes).
    Svg,
    /// PDF document with embedded raster image.
    Pdf,
}

impl ExportFormat {
    /// Parse a format name (`png`, `jpg`/`jpeg`, `svg`, `pdf`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "svg" => Some(Self::Svg),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// File extension used in download names.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }

    /// MIME type of the encoded output.
    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Svg => "image/svg+xml",
            Self::Pdf => "application/pdf",
        }
    }
}

/// Configuration for scene export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Scale factor applied to the scene viewport (default: 2.0).
    pub scale: f32,
    /// Background override as a CSS colour. `None` uses the scene background.
    pub background: Option<String>,
    /// JPEG quality 1-100 (default: 85).
    pub jpeg_quality: u8,
    /// DPI for print export (default: 96.0).
    pub dpi: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_EXPORT_SCALE,
            background: None,
            jpeg_quality: 85,
            dpi: 96.0,
        }
    }
}

/// Exports a [`Scene`] to various image and document formats.
pub struct SceneExporter {
    config: ExportConfig,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SceneExporter {
    /// Create a new exporter with the given configuration.
    ///
    /// System fonts are loaded once here and shared by every export.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        tracing::debug!("Export font database loaded: {} faces", fontdb.len());
        Self {
            config,
            fontdb: Arc::new(fontdb),
        }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// The exporter configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Number of font faces available to text rendering.
    #[must_use]
    pub fn font_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Export a scene to the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be rendered or encoded.
    pub fn export(&self, scene: &Scene, format: ExportFormat) -> RenderResult<Vec<u8>> {
        match format {
            ExportFormat::Png => self.render_to_png(scene),
            ExportFormat::Jpeg => self.render_to_jpeg(scene),
            ExportFormat::Svg => Ok(self.render_to_svg(scene).into_bytes()),
            ExportFormat::Pdf => self.render_to_pdf(scene),
        }
    }

    /// Export the scene as a PNG `data:` URL.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn to_data_url(&self, scene: &Scene) -> RenderResult<String> {
        let png = self.render_to_png(scene)?;
        Ok(DataUrl::encode(ExportFormat::Png.mime(), &png))
    }

    /// Export the scene to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn render_to_png(&self, scene: &Scene) -> RenderResult<Vec<u8>> {
        let pixmap = self.rasterize(scene)?;
        pixmap
            .encode_png()
            .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))
    }

    /// Export the scene to JPEG bytes. Transparent pixels are flattened
    /// onto white.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn render_to_jpeg(&self, scene: &Scene) -> RenderResult<Vec<u8>> {
        let pixmap = self.rasterize(scene)?;
        let rgb = flatten_premultiplied(pixmap.data(), [255, 255, 255]);
        encode_jpeg(&rgb, pixmap.width(), pixmap.height(), self.config.jpeg_quality)
    }

    /// Export the scene to an SVG string.
    #[must_use]
    pub fn render_to_svg(&self, scene: &Scene) -> String {
        let (out_w, out_h) = self.output_dimensions(scene);
        let background = self
            .config
            .background
            .as_deref()
            .unwrap_or_else(|| scene.background());
        scene_to_svg(scene, out_w, out_h, background)
    }

    /// Export the scene to PDF bytes.
    ///
    /// Renders the scene as a raster image and embeds it in a PDF page.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or PDF generation fails.
    pub fn render_to_pdf(&self, scene: &Scene) -> RenderResult<Vec<u8>> {
        let png = self.render_to_png(scene)?;
        encode_pdf(&png, self.config.dpi)
    }

    /// Get output dimensions (width, height) in pixels.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn output_dimensions(&self, scene: &Scene) -> (u32, u32) {
        let scale = if self.config.scale > 0.0 {
            self.config.scale
        } else {
            1.0
        };
        let out_w = (scene.viewport_width.max(1.0) * scale).round() as u32;
        let out_h = (scene.viewport_height.max(1.0) * scale).round() as u32;
        (out_w.max(1), out_h.max(1))
    }

    /// Rasterize the scene's SVG document to a tiny-skia Pixmap.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn rasterize(&self, scene: &Scene) -> RenderResult<tiny_skia::Pixmap> {
        let svg = self.render_to_svg(scene);
        let opt = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opt)
            .map_err(|e| RenderError::Export(format!("SVG parsing failed: {e}")))?;

        let px_w = tree.size().width().ceil() as u32;
        let px_h = tree.size().height().ceil() as u32;

        let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1))
            .ok_or_else(|| RenderError::Export("Failed to create pixmap".to_string()))?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
        tracing::debug!(
            "Rasterized {} elements to {}x{}",
            scene.element_count(),
            pixmap.width(),
            pixmap.height()
        );

        Ok(pixmap)
    }
}

impl Default for SceneExporter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Composite premultiplied RGBA pixels (tiny-skia pixmap data) onto an
/// opaque background, producing RGB.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn flatten_premultiplied(rgba: &[u8], background: [u8; 3]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for pixel in rgba.chunks_exact(4) {
        let inv = 1.0 - f32::from(pixel[3]) / 255.0;
        for channel in 0..3 {
            let value = f32::from(background[channel]).mul_add(inv, f32::from(pixel[channel]));
            rgb.push(value.round().clamp(0.0, 255.0) as u8);
        }
    }
    rgb
}

/// Composite straight-alpha RGBA pixels onto an opaque background, producing RGB.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn flatten_rgba(rgba: &[u8], background: [u8; 3]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for pixel in rgba.chunks_exact(4) {
        let alpha = f32::from(pixel[3]) / 255.0;
        let inv = 1.0 - alpha;
        for channel in 0..3 {
            let value = f32::from(pixel[channel]).mul_add(alpha, f32::from(background[channel]) * inv);
            rgb.push(value.round().clamp(0.0, 255.0) as u8);
        }
    }
    rgb
}

/// Encode RGB pixels as JPEG.
pub(crate) fn encode_jpeg(rgb: &[u8], width: u32, height: u32, quality: u8) -> RenderResult<Vec<u8>> {
    let mut buf = std::io::Cursor::new(Vec::new());
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    encoder
        .write_image(rgb, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| RenderError::Export(format!("JPEG encoding failed: {e}")))?;
    Ok(buf.into_inner())
}

/// Wrap a raster image in a single-page PDF sized to the image at `dpi`.
///
/// # Errors
///
/// Returns an error if the image cannot be decoded or the PDF cannot be
/// written.
#[allow(clippy::cast_precision_loss)]
pub fn encode_pdf(raster: &[u8], dpi: f32) -> RenderResult<Vec<u8>> {
    // Decode with printpdf's bundled image crate for compatibility
    let dynamic_image = printpdf::image_crate::load_from_memory(raster)
        .map_err(|e| RenderError::Export(format!("Failed to decode image for PDF: {e}")))?;

    let (px_w, px_h) = (dynamic_image.width(), dynamic_image.height());
    let dpi = if dpi > 0.0 { dpi } else { 96.0 };

    // pixels / dpi * 25.4
    let page_width_mm = px_w as f32 / dpi * 25.4;
    let page_height_mm = px_h as f32 / dpi * 25.4;

    let (doc, page1, layer1) = printpdf::PdfDocument::new(
        "Adcraft Export",
        printpdf::Mm(page_width_mm),
        printpdf::Mm(page_height_mm),
        "Layer 1",
    );
    let current_layer = doc.get_page(page1).get_layer(layer1);

    let pdf_image = printpdf::Image::from_dynamic_image(&dynamic_image);
    pdf_image.add_to_layer(
        current_layer,
        printpdf::ImageTransform {
            translate_x: Some(printpdf::Mm(0.0)),
            translate_y: Some(printpdf::Mm(0.0)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );

    doc.save_to_bytes()
        .map_err(|e| RenderError::Export(format!("PDF save failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use adcraft_core::{render, Session, TemplateId, TextField};

    fn classic_scene() -> Scene {
        let mut scene = Scene::default();
        render(&mut scene, &Session::new().with_text(TextField::Title, "Export"));
        scene
    }

    #[test]
    fn test_svg_export_uses_scene_background() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.set_background("#123456");
        let exporter = SceneExporter::new(ExportConfig {
            scale: 1.0,
            ..Default::default()
        });
        let svg = exporter.render_to_svg(&scene);
        assert!(svg.contains("fill=\"#123456\""));
    }

    #[test]
    fn test_background_override() {
        let scene = Scene::new(100.0, 100.0);
        let exporter = SceneExporter::new(ExportConfig {
            background: Some("#000000".to_string()),
            ..Default::default()
        });
        assert!(exporter.render_to_svg(&scene).contains("fill=\"#000000\""));
    }

    #[test]
    fn test_default_scale_doubles_output() {
        let exporter = SceneExporter::with_defaults();
        let svg = exporter.render_to_svg(&classic_scene());
        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"1000\""));
        assert!(svg.contains("viewBox=\"0 0 400 500\""));
    }

    #[test]
    fn test_png_export_produces_valid_bytes() {
        let exporter = SceneExporter::with_defaults();
        let png = exporter.render_to_png(&classic_scene()).expect("png export");
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);

        let decoded = image::load_from_memory(&png).expect("decode");
        assert_eq!((decoded.width(), decoded.height()), (800, 1000));
    }

    #[test]
    fn test_jpeg_export_produces_valid_bytes() {
        let exporter = SceneExporter::with_defaults();
        let jpeg = exporter.render_to_jpeg(&classic_scene()).expect("jpeg export");
        assert!(jpeg.len() > 2);
        assert_eq!(jpeg[0], 0xFF);
        assert_eq!(jpeg[1], 0xD8);
    }

    #[test]
    fn test_pdf_export_produces_valid_bytes() {
        let exporter = SceneExporter::with_defaults();
        let pdf = exporter.render_to_pdf(&classic_scene()).expect("pdf export");
        assert_eq!(&pdf[0..5], b"%PDF-");
    }

    #[test]
    fn test_export_dispatch() {
        let mut scene = Scene::default();
        render(&mut scene, &Session::new().with_template(TemplateId::Grid));
        let exporter = SceneExporter::new(ExportConfig {
            scale: 1.0,
            ..Default::default()
        });

        let png = exporter.export(&scene, ExportFormat::Png).expect("png");
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);

        let jpeg = exporter.export(&scene, ExportFormat::Jpeg).expect("jpeg");
        assert_eq!(jpeg[0], 0xFF);

        let svg = exporter.export(&scene, ExportFormat::Svg).expect("svg");
        let svg_str = String::from_utf8(svg).expect("utf8");
        assert!(svg_str.starts_with("<svg"));

        let pdf = exporter.export(&scene, ExportFormat::Pdf).expect("pdf");
        assert_eq!(&pdf[0..5], b"%PDF-");
    }

    #[test]
    fn test_data_url_is_png() {
        let exporter = SceneExporter::with_defaults();
        let url = exporter.to_data_url(&classic_scene()).expect("data url");
        let parsed = DataUrl::parse(&url).expect("parse");
        assert_eq!(parsed.mime, "image/png");
        assert_eq!(&parsed.bytes[0..4], &[137, 80, 78, 71]);
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ExportFormat::from_name("JPEG"), Some(ExportFormat::Jpeg));
        assert_eq!(ExportFormat::from_name("pdf"), Some(ExportFormat::Pdf));
        assert_eq!(ExportFormat::from_name("webp"), None);
        assert_eq!(ExportFormat::Jpeg.extension(), "jpg");
        assert_eq!(ExportFormat::Svg.mime(), "image/svg+xml");
    }

    #[test]
    fn test_flatten_transparent_pixel() {
        let rgb = flatten_rgba(&[0, 0, 0, 0, 10, 20, 30, 255], [255, 255, 255]);
        assert_eq!(rgb, vec![255, 255, 255, 10, 20, 30]);
    }

    #[test]
    fn test_flatten_premultiplied_half_alpha() {
        // 50% red as tiny-skia stores it: colour channels already scaled by alpha.
        let rgb = flatten_premultiplied(&[128, 0, 0, 128], [255, 255, 255]);
        assert_eq!(rgb, vec![255, 127, 127]);

        let opaque = flatten_premultiplied(&[10, 20, 30, 255, 0, 0, 0, 0], [255, 255, 255]);
        assert_eq!(opaque, vec![10, 20, 30, 255, 255, 255]);
    }
}
