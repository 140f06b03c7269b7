//! Scene graph holding the live preview elements.

use serde::{Deserialize, Serialize};

use crate::element::{Role, VisualElement};
use crate::{EditorError, EditorResult, ElementId};

/// Default background fill.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// An element placed in a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Unique identifier.
    pub id: ElementId,
    /// Element content and position.
    pub element: VisualElement,
}

/// The preview scene. Paint order is insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Placed elements, bottom to top.
    nodes: Vec<SceneNode>,
    /// Background fill colour.
    background: String,
    /// Viewport width in pixels.
    pub viewport_width: f32,
    /// Viewport height in pixels.
    pub viewport_height: f32,
    /// Incremented on every redraw request.
    revision: u64,
}

impl Scene {
    /// Create a new empty scene with the given viewport size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            nodes: Vec::new(),
            background: DEFAULT_BACKGROUND.to_string(),
            viewport_width: width,
            viewport_height: height,
            revision: 0,
        }
    }

    /// Add an element on top of the scene.
    pub fn add_element(&mut self, element: VisualElement) -> ElementId {
        let id = ElementId::new();
        self.nodes.push(SceneNode { id, element });
        id
    }

    /// All placed nodes, bottom to top.
    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter()
    }

    /// All placed elements, bottom to top.
    pub fn elements(&self) -> impl Iterator<Item = &VisualElement> {
        self.nodes.iter().map(|n| &n.element)
    }

    /// First element with the given role.
    #[must_use]
    pub fn find_by_role(&self, role: Role) -> Option<&VisualElement> {
        self.elements().find(|e| e.role == role)
    }

    /// Mutable reference to the first element with the given role.
    pub fn find_by_role_mut(&mut self, role: Role) -> Option<&mut VisualElement> {
        self.nodes
            .iter_mut()
            .map(|n| &mut n.element)
            .find(|e| e.role == role)
    }

    /// Number of elements with the given role.
    #[must_use]
    pub fn count_role(&self, role: Role) -> usize {
        self.elements().filter(|e| e.role == role).count()
    }

    /// Remove every placed element. The background is kept.
    pub fn clear_elements(&mut self) {
        self.nodes.clear();
    }

    /// Background fill colour.
    #[must_use]
    pub fn background(&self) -> &str {
        &self.background
    }

    /// Set the background fill colour.
    pub fn set_background(&mut self, color: impl Into<String>) {
        self.background = color.into();
    }

    /// Set the viewport dimensions.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Mark the scene as needing a repaint.
    pub fn request_redraw(&mut self) {
        self.revision += 1;
    }

    /// Number of redraws requested so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Get the number of elements in the scene.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the scene is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serialize the scene to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> EditorResult<String> {
        serde_json::to_string(self).map_err(EditorError::Serialization)
    }

    /// Deserialize a scene from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        serde_json::from_str(json).map_err(EditorError::Serialization)
    }
}

impl Default for Scene {
    fn default() -> Self {
        let size = crate::Orientation::default().canvas_size();
        Self::new(size.width_f32(), size.height_f32())
    }
}
