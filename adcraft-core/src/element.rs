//! Visual elements - the building blocks of a creative.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EditorError, EditorResult};

/// Unique identifier for an element placed in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The part an element plays in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Main image placeholder, or the uploaded image that replaced it.
    MainImage,
    /// "Main Image" caption drawn over an empty placeholder.
    ImageLabel,
    /// Headline text.
    Title,
    /// Supporting text.
    Subtitle,
    /// Call-to-action text.
    Cta,
    /// Button shape behind the call-to-action text.
    CtaButton,
    /// Decorative colour block.
    Accent,
    /// Brand logo.
    Logo,
}

/// Which point of the frame `x`/`y` refer to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// `x`/`y` is the top-left corner.
    #[default]
    TopLeft,
    /// `x`/`y` is the center point.
    Center,
}

/// An axis-aligned box in canvas pixels, always expressed by its top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Anchor point and size of an element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Anchor X position (pixels from left).
    pub x: f32,
    /// Anchor Y position (pixels from top).
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Meaning of the anchor point.
    pub origin: Origin,
}

impl Frame {
    /// A frame anchored at its top-left corner.
    #[must_use]
    pub fn top_left(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            origin: Origin::TopLeft,
        }
    }

    /// A frame anchored at its center point.
    #[must_use]
    pub fn centered(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            origin: Origin::Center,
        }
    }

    /// Bounding box of the frame.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self.origin {
            Origin::TopLeft => Rect::new(self.x, self.y, self.width, self.height),
            Origin::Center => Rect::new(
                self.x - self.width / 2.0,
                self.y - self.height / 2.0,
                self.width,
                self.height,
            ),
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush left.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Flush right.
    Right,
}

/// Font and colour of a text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font family name.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// CSS font weight (400 regular, 700 bold).
    pub font_weight: u16,
    /// Horizontal alignment within the frame.
    pub align: TextAlign,
    /// Text colour as hex.
    pub color: String,
}

/// A decoded image ready to be placed on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    /// MIME type of the original upload.
    pub mime: String,
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// Image bytes as a `data:` URL.
    pub data_url: String,
}

impl ImageAsset {
    /// Create an asset, rejecting non-image MIME types and empty sizes.
    ///
    /// # Errors
    ///
    /// Returns an error if `mime` is not `image/*` or either dimension is zero.
    pub fn new(
        mime: impl Into<String>,
        width: u32,
        height: u32,
        data_url: impl Into<String>,
    ) -> EditorResult<Self> {
        let mime = mime.into();
        if !is_image_mime(&mime) {
            return Err(EditorError::UnsupportedMime(mime));
        }
        if width == 0 || height == 0 {
            return Err(EditorError::InvalidDimensions { width, height });
        }
        Ok(Self {
            mime,
            width,
            height,
            data_url: data_url.into(),
        })
    }
}

/// Check whether a MIME type names an image (`image/*`).
#[must_use]
pub fn is_image_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

/// The type of content an element contains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    /// A filled rectangle.
    Rect {
        /// Fill colour as hex.
        fill: String,
        /// Corner radius in pixels.
        corner_radius: f32,
    },

    /// A text box.
    Text {
        /// Literal text content.
        content: String,
        /// Font and colour.
        style: TextStyle,
    },

    /// A raster image drawn at `scale` and optionally clipped.
    Image {
        /// Image content.
        asset: ImageAsset,
        /// Uniform scale applied to the natural size.
        scale: f32,
        /// Region outside of which nothing is drawn.
        clip: Option<Rect>,
    },
}

/// A positioned element with a role tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualElement {
    /// Part this element plays in the template.
    pub role: Role,
    /// Position and size.
    pub frame: Frame,
    /// Element content.
    pub kind: ElementKind,
}

impl VisualElement {
    /// Create a filled rectangle.
    #[must_use]
    pub fn rect(role: Role, frame: Frame, fill: impl Into<String>) -> Self {
        Self {
            role,
            frame,
            kind: ElementKind::Rect {
                fill: fill.into(),
                corner_radius: 0.0,
            },
        }
    }

    /// Create a text box.
    #[must_use]
    pub fn text(role: Role, frame: Frame, content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            role,
            frame,
            kind: ElementKind::Text {
                content: content.into(),
                style,
            },
        }
    }

    /// Set the corner radius of a rectangle. No effect on other kinds.
    #[must_use]
    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        if let ElementKind::Rect { corner_radius, .. } = &mut self.kind {
            *corner_radius = radius;
        }
        self
    }

    /// Text content, if this is a text element.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}
