//! Orientation presets and the canvas sizes they map to.

use serde::{Deserialize, Serialize};

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasSize {
    /// Create a canvas size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width as a float, for layout math.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn width_f32(self) -> f32 {
        self.width as f32
    }

    /// Height as a float, for layout math.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn height_f32(self) -> f32 {
        self.height as f32
    }
}

/// Aspect-ratio preset controlling canvas pixel dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Orientation {
    /// 4:5 portrait, 400x500.
    #[default]
    Vertical,
    /// 1:1, 400x400.
    Square,
    /// 1.91:1 landscape, 600x314.
    Horizontal,
}

impl Orientation {
    /// Every orientation, in catalog order.
    pub const ALL: [Self; 3] = [Self::Vertical, Self::Square, Self::Horizontal];

    /// Stable identifier used by UI controls.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Square => "square",
            Self::Horizontal => "horizontal",
        }
    }

    /// Human readable name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Vertical => "Vertical",
            Self::Square => "Square",
            Self::Horizontal => "Horizontal",
        }
    }

    /// Aspect ratio label.
    #[must_use]
    pub fn aspect_ratio(self) -> &'static str {
        match self {
            Self::Vertical => "4:5",
            Self::Square => "1:1",
            Self::Horizontal => "1.91:1",
        }
    }

    /// Canvas pixel dimensions for this orientation.
    #[must_use]
    pub fn canvas_size(self) -> CanvasSize {
        match self {
            Self::Vertical => CanvasSize::new(400, 500),
            Self::Square => CanvasSize::new(400, 400),
            Self::Horizontal => CanvasSize::new(600, 314),
        }
    }

    /// Look up an orientation by identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.id() == id)
    }

    /// Look up an orientation, falling back to [`Orientation::Vertical`].
    #[must_use]
    pub fn resolve(id: &str) -> Self {
        Self::from_id(id).unwrap_or_else(|| {
            tracing::debug!("Unknown orientation '{id}', using vertical");
            Self::default()
        })
    }

    /// Catalog entry for this orientation.
    #[must_use]
    pub fn descriptor(self) -> OrientationDescriptor {
        let size = self.canvas_size();
        OrientationDescriptor {
            id: self.id(),
            name: self.display_name(),
            aspect_ratio: self.aspect_ratio(),
            width: size.width,
            height: size.height,
        }
    }
}

impl From<String> for Orientation {
    fn from(id: String) -> Self {
        Self::resolve(&id)
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Serializable catalog entry describing an orientation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrientationDescriptor {
    /// Identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Aspect ratio label.
    pub aspect_ratio: &'static str,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}
