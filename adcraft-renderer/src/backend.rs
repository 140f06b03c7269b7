//! Live preview backends.

use adcraft_core::{ElementKind, Scene, VisualElement};

use crate::svg::scene_to_svg;
use crate::{BackendType, RenderResult};

/// Trait for preview backends.
pub trait RenderBackend {
    /// Get the backend type.
    fn backend_type(&self) -> BackendType;

    /// Render a scene.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, scene: &Scene) -> RenderResult<()>;

    /// Resize the rendering surface.
    ///
    /// # Errors
    ///
    /// Returns an error if resizing fails.
    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()>;

    /// The most recent frame, if the backend keeps one.
    fn last_frame(&self) -> Option<&str> {
        None
    }
}

/// Keeps the most recent frame as an SVG document.
#[derive(Debug, Default)]
pub struct SvgPreviewBackend {
    width: u32,
    height: u32,
    frame: Option<String>,
}

impl SvgPreviewBackend {
    /// Create a new SVG preview backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last rendered frame.
    #[must_use]
    pub fn frame(&self) -> Option<&str> {
        self.frame.as_deref()
    }
}

impl RenderBackend for SvgPreviewBackend {
    fn backend_type(&self) -> BackendType {
        BackendType::SvgPreview
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(&mut self, scene: &Scene) -> RenderResult<()> {
        let width = if self.width == 0 {
            scene.viewport_width.max(1.0) as u32
        } else {
            self.width
        };
        let height = if self.height == 0 {
            scene.viewport_height.max(1.0) as u32
        } else {
            self.height
        };
        self.frame = Some(scene_to_svg(scene, width, height, scene.background()));
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.width = width;
        self.height = height;
        tracing::debug!("SVG preview resized to {}x{}", width, height);
        Ok(())
    }

    fn last_frame(&self) -> Option<&str> {
        self.frame()
    }
}

/// Logs every element instead of drawing. Used for headless runs.
#[derive(Debug)]
pub struct TraceBackend {
    width: u32,
    height: u32,
}

impl TraceBackend {
    /// Create a new trace backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 400,
            height: 500,
        }
    }

    fn render_element(element: &VisualElement) {
        let b = element.frame.bounds();
        let details = match &element.kind {
            ElementKind::Rect { fill, .. } => format!("rect fill={fill}"),
            ElementKind::Text { content, style } => {
                format!("text '{content}' font={} {}", style.font_size, style.color)
            }
            ElementKind::Image { asset, scale, clip } => format!(
                "image {}x{} {} scale={scale} clipped={}",
                asset.width,
                asset.height,
                asset.mime,
                clip.is_some()
            ),
        };
        tracing::trace!(
            "Render {:?} at ({}, {}) size {}x{}: {details}",
            element.role,
            b.x,
            b.y,
            b.width,
            b.height
        );
    }
}

impl Default for TraceBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for TraceBackend {
    fn backend_type(&self) -> BackendType {
        BackendType::Trace
    }

    fn render(&mut self, scene: &Scene) -> RenderResult<()> {
        tracing::trace!(
            "Trace render: {} elements, surface {}x{}",
            scene.element_count(),
            self.width,
            self.height
        );
        for element in scene.elements() {
            Self::render_element(element);
        }
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.width = width;
        self.height = height;
        Ok(())
    }
}
