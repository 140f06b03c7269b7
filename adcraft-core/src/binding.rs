//! Control bindings: UI events in, session transitions and re-renders out.
//!
//! The host (browser glue, a test, the server) forwards discrete control
//! events to an [`Editor`]. Each event produces a new [`Session`] and either
//! a full rebuild of the scene or an in-place text update. File decoding is
//! the one asynchronous step and happens outside the editor: a file event
//! yields a [`PendingUpload`], and the decoded asset comes back through
//! [`Editor::complete_upload`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::element::{is_image_mime, ImageAsset};
use crate::render::{render, sync_text};
use crate::session::{ImageSlot, TextField};
use crate::{Orientation, Scene, Session, TemplateId};

/// A form control the editor listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlId {
    /// Template dropdown.
    TemplateSelect,
    /// Orientation dropdown.
    OrientationSelect,
    /// Headline input.
    TitleInput,
    /// Supporting line input.
    SubtitleInput,
    /// Call-to-action input.
    CtaInput,
    /// Main image file picker.
    MainImageInput,
    /// Logo file picker.
    LogoInput,
}

impl ControlId {
    /// Every control.
    pub const ALL: [Self; 7] = [
        Self::TemplateSelect,
        Self::OrientationSelect,
        Self::TitleInput,
        Self::SubtitleInput,
        Self::CtaInput,
        Self::MainImageInput,
        Self::LogoInput,
    ];
}

/// The controls present on the page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlSet(HashSet<ControlId>);

impl ControlSet {
    /// Every control present.
    #[must_use]
    pub fn all() -> Self {
        Self(ControlId::ALL.into_iter().collect())
    }

    /// No controls present.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a control.
    #[must_use]
    pub fn with(mut self, control: ControlId) -> Self {
        self.0.insert(control);
        self
    }

    /// Remove a control.
    #[must_use]
    pub fn without(mut self, control: ControlId) -> Self {
        self.0.remove(&control);
        self
    }

    /// Check whether a control is present.
    #[must_use]
    pub fn contains(&self, control: ControlId) -> bool {
        self.0.contains(&control)
    }
}

impl FromIterator<ControlId> for ControlSet {
    fn from_iter<I: IntoIterator<Item = ControlId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A file chosen in a file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    /// File name as reported by the picker.
    pub name: String,
    /// Declared MIME type.
    pub mime: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

/// A discrete UI event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    /// Template dropdown changed.
    TemplateSelected(String),
    /// Orientation dropdown changed.
    OrientationSelected(String),
    /// A text input changed.
    TextChanged {
        /// Which input.
        field: TextField,
        /// New value.
        value: String,
    },
    /// A file picker produced a file.
    FileSelected {
        /// Which picker.
        slot: ImageSlot,
        /// The chosen file.
        file: FileSelection,
    },
}

impl ControlEvent {
    /// The control that emits this event.
    #[must_use]
    pub fn control(&self) -> ControlId {
        match self {
            Self::TemplateSelected(_) => ControlId::TemplateSelect,
            Self::OrientationSelected(_) => ControlId::OrientationSelect,
            Self::TextChanged { field, .. } => match field {
                TextField::Title => ControlId::TitleInput,
                TextField::Subtitle => ControlId::SubtitleInput,
                TextField::Cta => ControlId::CtaInput,
            },
            Self::FileSelected { slot, .. } => match slot {
                ImageSlot::MainImage => ControlId::MainImageInput,
                ImageSlot::Logo => ControlId::LogoInput,
            },
        }
    }
}

/// A file waiting to be decoded by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    /// Sequence number, increasing per editor.
    pub ticket: u64,
    /// Destination slot.
    pub slot: ImageSlot,
    /// The file to decode.
    pub file: FileSelection,
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingOutcome {
    /// The control is not present on the page; nothing changed.
    Skipped,
    /// The file was not an image; nothing changed.
    Rejected {
        /// Declared MIME type of the rejected file.
        mime: String,
    },
    /// The scene was rebuilt from the new session.
    Rerendered,
    /// Only a text element changed.
    TextUpdated,
    /// The file must be decoded and handed back via [`Editor::complete_upload`].
    UploadPending(PendingUpload),
}

/// Session, scene and the controls that drive them.
#[derive(Debug, Clone)]
pub struct Editor {
    session: Session,
    scene: Scene,
    controls: ControlSet,
    next_ticket: u64,
}

impl Editor {
    /// Create an editor with a default session and render it.
    #[must_use]
    pub fn new(controls: ControlSet) -> Self {
        Self::with_session(Session::new(), controls)
    }

    /// Create an editor for an existing session and render it.
    #[must_use]
    pub fn with_session(session: Session, controls: ControlSet) -> Self {
        let mut scene = Scene::default();
        render(&mut scene, &session);
        Self {
            session,
            scene,
            controls,
            next_ticket: 0,
        }
    }

    /// Current session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Controls this editor reacts to.
    #[must_use]
    pub fn controls(&self) -> &ControlSet {
        &self.controls
    }

    /// Handle one UI event.
    pub fn handle(&mut self, event: ControlEvent) -> BindingOutcome {
        let control = event.control();
        if !self.controls.contains(control) {
            tracing::debug!("Control {control:?} not present, ignoring event");
            return BindingOutcome::Skipped;
        }

        match event {
            ControlEvent::TemplateSelected(id) => {
                let template = TemplateId::resolve(&id);
                self.transition(|s| s.with_template(template));
                BindingOutcome::Rerendered
            }
            ControlEvent::OrientationSelected(id) => {
                let orientation = Orientation::resolve(&id);
                self.transition(|s| s.with_orientation(orientation));
                BindingOutcome::Rerendered
            }
            ControlEvent::TextChanged { field, value } => {
                let session = std::mem::take(&mut self.session);
                self.session = session.with_text(field, value);
                if sync_text(&mut self.scene, field.role(), self.session.text(field)) {
                    BindingOutcome::TextUpdated
                } else {
                    render(&mut self.scene, &self.session);
                    BindingOutcome::Rerendered
                }
            }
            ControlEvent::FileSelected { slot, file } => {
                if !is_image_mime(&file.mime) {
                    tracing::warn!("Rejected upload '{}' of type '{}'", file.name, file.mime);
                    return BindingOutcome::Rejected { mime: file.mime };
                }
                self.next_ticket += 1;
                tracing::debug!("Upload #{} for {slot:?} waiting for decode", self.next_ticket);
                BindingOutcome::UploadPending(PendingUpload {
                    ticket: self.next_ticket,
                    slot,
                    file,
                })
            }
        }
    }

    /// Store a decoded image and re-render.
    ///
    /// Uploads are not sequenced: when two complete for the same slot, the
    /// later call wins.
    pub fn complete_upload(&mut self, slot: ImageSlot, asset: ImageAsset) {
        tracing::debug!(
            "Upload for {slot:?} decoded: {}x{} {}",
            asset.width,
            asset.height,
            asset.mime
        );
        self.transition(|s| s.with_image(slot, asset));
    }

    /// Empty an image slot and re-render.
    pub fn clear_image(&mut self, slot: ImageSlot) {
        self.transition(|s| s.without_image(slot));
    }

    /// Replace the whole session and re-render.
    pub fn replace_session(&mut self, session: Session) {
        self.transition(|_| session);
    }

    /// Rebuild the scene from the current session.
    pub fn rerender(&mut self) {
        render(&mut self.scene, &self.session);
    }

    fn transition(&mut self, f: impl FnOnce(Session) -> Session) {
        let session = std::mem::take(&mut self.session);
        self.session = f(session);
        render(&mut self.scene, &self.session);
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(ControlSet::all())
    }
}
