//! Template identifiers.

use serde::{Deserialize, Serialize};

/// A named fixed arrangement of image and text placeholders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum TemplateId {
    /// Centered image, stacked headline, subtitle and call-to-action button.
    #[default]
    Classic,
    /// Image fills the left half, text on the right.
    SplitLeft,
    /// Image fills the right half, text on the left.
    SplitRight,
    /// Image fills the top half, text below.
    SplitTop,
    /// Two-by-two grid: image, headline, subtitle and an accent block.
    Grid,
}

impl TemplateId {
    /// Every template, in catalog order.
    pub const ALL: [Self; 5] = [
        Self::Classic,
        Self::SplitLeft,
        Self::SplitRight,
        Self::SplitTop,
        Self::Grid,
    ];

    /// Stable identifier used by UI controls.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::SplitLeft => "splitLeft",
            Self::SplitRight => "splitRight",
            Self::SplitTop => "splitTop",
            Self::Grid => "grid",
        }
    }

    /// Human readable name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::SplitLeft => "Split Left",
            Self::SplitRight => "Split Right",
            Self::SplitTop => "Split Top",
            Self::Grid => "Grid",
        }
    }

    /// Whether the template carries a call-to-action button.
    #[must_use]
    pub fn has_cta(self) -> bool {
        matches!(self, Self::Classic)
    }

    /// Whether an uploaded main image is clipped to its placeholder.
    #[must_use]
    pub fn clips_main_image(self) -> bool {
        !matches!(self, Self::Classic)
    }

    /// Look up a template by identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    /// Look up a template, falling back to [`TemplateId::Classic`].
    #[must_use]
    pub fn resolve(id: &str) -> Self {
        Self::from_id(id).unwrap_or_else(|| {
            tracing::debug!("Unknown template '{id}', using classic");
            Self::default()
        })
    }

    /// Catalog entry for this template.
    #[must_use]
    pub fn descriptor(self) -> TemplateDescriptor {
        TemplateDescriptor {
            id: self.id(),
            name: self.display_name(),
            has_cta: self.has_cta(),
        }
    }
}

impl From<String> for TemplateId {
    fn from(id: String) -> Self {
        Self::resolve(&id)
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Serializable catalog entry describing a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateDescriptor {
    /// Identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Whether the template has a call-to-action.
    pub has_cta: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for template in TemplateId::ALL {
            assert_eq!(TemplateId::from_id(template.id()), Some(template));
        }
    }

    #[test]
    fn unknown_template_is_classic() {
        assert_eq!(TemplateId::resolve("doesNotExist"), TemplateId::Classic);
        assert_eq!(TemplateId::resolve("splitleft"), TemplateId::Classic);
    }

    #[test]
    fn serde_uses_control_ids() {
        let json = serde_json::to_string(&TemplateId::SplitRight).expect("serialize");
        assert_eq!(json, "\"splitRight\"");
        let parsed: TemplateId = serde_json::from_str("\"splitTop\"").expect("parse");
        assert_eq!(parsed, TemplateId::SplitTop);
    }

    #[test]
    fn unknown_id_deserializes_to_classic() {
        let parsed: TemplateId = serde_json::from_str("\"doesNotExist\"").expect("parse");
        assert_eq!(parsed, TemplateId::Classic);
    }

    #[test]
    fn only_classic_has_cta() {
        let with_cta: Vec<_> = TemplateId::ALL.into_iter().filter(|t| t.has_cta()).collect();
        assert_eq!(with_cta, vec![TemplateId::Classic]);
    }
}
