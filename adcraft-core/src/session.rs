//! Editor session: the user-editable state that drives rendering.
//!
//! A [`Session`] is a value. Every edit produces a new session, and the
//! render driver rebuilds the scene from whichever session it is handed.

use serde::{Deserialize, Serialize};

use crate::element::{ImageAsset, Role};
use crate::layout::TextContent;
use crate::{CanvasSize, EditorResult, Orientation, TemplateId};

/// Which text input a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextField {
    /// Headline.
    Title,
    /// Supporting line.
    Subtitle,
    /// Call-to-action label.
    Cta,
}

impl TextField {
    /// Role of the scene element that displays this field.
    #[must_use]
    pub fn role(self) -> Role {
        match self {
            Self::Title => Role::Title,
            Self::Subtitle => Role::Subtitle,
            Self::Cta => Role::Cta,
        }
    }

    /// Look up a field by name (`title`, `subtitle`, `cta`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Self::Title),
            "subtitle" => Some(Self::Subtitle),
            "cta" => Some(Self::Cta),
            _ => None,
        }
    }
}

/// Which uploaded image a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageSlot {
    /// The main creative image.
    MainImage,
    /// The brand logo.
    Logo,
}

impl ImageSlot {
    /// Look up a slot by name (`main-image`, `logo`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "main-image" | "mainImage" => Some(Self::MainImage),
            "logo" => Some(Self::Logo),
            _ => None,
        }
    }
}

/// The current user-editable state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    template: TemplateId,
    orientation: Orientation,
    content: TextContent,
    main_image: Option<ImageAsset>,
    logo: Option<ImageAsset>,
}

impl Session {
    /// Create a session with default template, orientation and text.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current template.
    #[must_use]
    pub fn template(&self) -> TemplateId {
        self.template
    }

    /// Current orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Canvas pixel size implied by the orientation.
    #[must_use]
    pub fn canvas_size(&self) -> CanvasSize {
        self.orientation.canvas_size()
    }

    /// Current text.
    #[must_use]
    pub fn content(&self) -> &TextContent {
        &self.content
    }

    /// Text of a single field.
    #[must_use]
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Title => &self.content.title,
            TextField::Subtitle => &self.content.subtitle,
            TextField::Cta => &self.content.cta,
        }
    }

    /// Uploaded main image, if any.
    #[must_use]
    pub fn main_image(&self) -> Option<&ImageAsset> {
        self.main_image.as_ref()
    }

    /// Uploaded logo, if any.
    #[must_use]
    pub fn logo(&self) -> Option<&ImageAsset> {
        self.logo.as_ref()
    }

    /// Image in the given slot, if any.
    #[must_use]
    pub fn image(&self, slot: ImageSlot) -> Option<&ImageAsset> {
        match slot {
            ImageSlot::MainImage => self.main_image(),
            ImageSlot::Logo => self.logo(),
        }
    }

    /// Same session with a different template.
    #[must_use]
    pub fn with_template(self, template: TemplateId) -> Self {
        Self { template, ..self }
    }

    /// Same session with a different orientation.
    #[must_use]
    pub fn with_orientation(self, orientation: Orientation) -> Self {
        Self {
            orientation,
            ..self
        }
    }

    /// Same session with all text replaced.
    #[must_use]
    pub fn with_content(self, content: TextContent) -> Self {
        Self { content, ..self }
    }

    /// Same session with one text field replaced.
    #[must_use]
    pub fn with_text(mut self, field: TextField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            TextField::Title => self.content.title = value,
            TextField::Subtitle => self.content.subtitle = value,
            TextField::Cta => self.content.cta = value,
        }
        self
    }

    /// Same session with an image stored in `slot`.
    #[must_use]
    pub fn with_image(mut self, slot: ImageSlot, asset: ImageAsset) -> Self {
        match slot {
            ImageSlot::MainImage => self.main_image = Some(asset),
            ImageSlot::Logo => self.logo = Some(asset),
        }
        self
    }

    /// Same session with `slot` emptied.
    #[must_use]
    pub fn without_image(mut self, slot: ImageSlot) -> Self {
        match slot {
            ImageSlot::MainImage => self.main_image = None,
            ImageSlot::Logo => self.logo = None,
        }
        self
    }

    /// Serialize the session to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize a session from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset() -> ImageAsset {
        ImageAsset::new("image/png", 10, 20, "data:image/png;base64,AA==").expect("asset")
    }

    #[test]
    fn defaults() {
        let session = Session::new();
        assert_eq!(session.template(), TemplateId::Classic);
        assert_eq!(session.orientation(), Orientation::Vertical);
        assert_eq!(session.canvas_size(), CanvasSize::new(400, 500));
        assert!(session.main_image().is_none());
        assert!(session.logo().is_none());
    }

    #[test]
    fn edits_produce_new_values() {
        let original = Session::new();
        let edited = original
            .clone()
            .with_template(TemplateId::Grid)
            .with_orientation(Orientation::Square)
            .with_text(TextField::Title, "Sale");

        assert_eq!(original.template(), TemplateId::Classic);
        assert_eq!(edited.template(), TemplateId::Grid);
        assert_eq!(edited.canvas_size(), CanvasSize::new(400, 400));
        assert_eq!(edited.text(TextField::Title), "Sale");
        assert_eq!(edited.text(TextField::Cta), original.text(TextField::Cta));
    }

    #[test]
    fn image_slots_are_independent() {
        let session = Session::new().with_image(ImageSlot::Logo, asset());
        assert!(session.logo().is_some());
        assert!(session.main_image().is_none());

        let session = session.with_image(ImageSlot::MainImage, asset());
        let session = session.without_image(ImageSlot::Logo);
        assert!(session.image(ImageSlot::MainImage).is_some());
        assert!(session.image(ImageSlot::Logo).is_none());
    }

    #[test]
    fn json_roundtrip() {
        let session = Session::new()
            .with_template(TemplateId::SplitTop)
            .with_image(ImageSlot::MainImage, asset());
        let json = session.to_json().expect("serialize");
        assert!(json.contains("splitTop"));
        assert_eq!(Session::from_json(&json).expect("parse"), session);
    }

    #[test]
    fn unknown_ids_fall_back_when_parsed() {
        let session =
            Session::from_json(r#"{"template":"doesNotExist","orientation":"diagonal"}"#)
                .expect("parse");
        assert_eq!(session.template(), TemplateId::Classic);
        assert_eq!(session.orientation(), Orientation::Vertical);
    }

    #[test]
    fn field_and_slot_names() {
        assert_eq!(TextField::from_name("cta"), Some(TextField::Cta));
        assert_eq!(TextField::from_name("body"), None);
        assert_eq!(ImageSlot::from_name("main-image"), Some(ImageSlot::MainImage));
        assert_eq!(ImageSlot::from_name("logo"), Some(ImageSlot::Logo));
        assert_eq!(ImageSlot::from_name("banner"), None);
    }
}
