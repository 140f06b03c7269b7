//! # Adcraft Renderer
//!
//! Turns editor scenes into pixels and bytes.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  Scene                      │
//! ├─────────────────────────────────────────────┤
//! │  SVG document  →  preview backend           │
//! │       ↓                                     │
//! │  resvg / tiny-skia  →  PNG / JPEG / PDF     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Uploads travel the other way: bytes are MIME-gated, sniffed, decoded and
//! turned into an [`adcraft_core::ImageAsset`] by [`upload::UploadDecoder`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod datauri;
pub mod error;
pub mod svg;

#[cfg(feature = "export")]
pub mod export;
#[cfg(feature = "export")]
pub mod reencode;
#[cfg(feature = "images")]
pub mod upload;

pub use backend::RenderBackend;
pub use datauri::DataUrl;
pub use error::{RenderError, RenderResult};
pub use svg::scene_to_svg;

#[cfg(feature = "export")]
pub use export::{ExportConfig, ExportFormat, SceneExporter};
#[cfg(feature = "export")]
pub use reencode::{export_image_from_data_url, export_pdf_from_data_url, ImageExportFormat};
#[cfg(feature = "images")]
pub use upload::{ImageFormat, UploadDecoder};

use adcraft_core::Scene;

/// Configuration for the renderer.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Preview backend to use.
    pub preferred_backend: BackendType,
    /// Skip frames whose scene revision was already drawn.
    pub skip_unchanged: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            preferred_backend: BackendType::SvgPreview,
            skip_unchanged: true,
        }
    }
}

/// Available preview backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// Keeps the latest frame as an SVG document.
    SvgPreview,
    /// Logs elements without drawing.
    Trace,
}

/// The main renderer interface.
pub struct Renderer {
    config: RendererConfig,
    backend: Box<dyn RenderBackend>,
    frame_count: u64,
    last_revision: Option<u64>,
}

impl Renderer {
    /// Create a new renderer with the given configuration.
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        let backend: Box<dyn RenderBackend> = match config.preferred_backend {
            BackendType::SvgPreview => Box::new(backend::SvgPreviewBackend::new()),
            BackendType::Trace => Box::new(backend::TraceBackend::new()),
        };

        Self {
            config,
            backend,
            frame_count: 0,
            last_revision: None,
        }
    }

    /// Render a frame.
    ///
    /// Returns `false` when the scene revision was already drawn and the
    /// renderer skips unchanged scenes.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render(&mut self, scene: &Scene) -> RenderResult<bool> {
        if self.config.skip_unchanged && self.last_revision == Some(scene.revision()) {
            return Ok(false);
        }
        self.backend.render(scene)?;
        self.last_revision = Some(scene.revision());
        self.frame_count += 1;
        Ok(true)
    }

    /// The most recent frame, for backends that keep one.
    #[must_use]
    pub fn last_frame(&self) -> Option<&str> {
        self.backend.last_frame()
    }

    /// Get the current frame count.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the active backend type.
    #[must_use]
    pub fn active_backend(&self) -> BackendType {
        self.backend.backend_type()
    }

    /// Get the renderer configuration.
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Resize the rendering surface. The next frame is always drawn.
    ///
    /// # Errors
    ///
    /// Returns an error if resize fails.
    pub fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.last_revision = None;
        self.backend.resize(width, height)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}
