//! # Adcraft Core
//!
//! Editor logic for template-driven ad creatives.
//! Compiles to WASM so the browser editor runs the same code as the server.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              adcraft-core.wasm              │
//! ├─────────────────────────────────────────────┤
//! │  Control Bindings  →  Session (value)       │
//! │  - UI events          - template            │
//! │  - upload tickets     - orientation / text  │
//! ├─────────────────────────────────────────────┤
//! │  Render Driver     →  Scene Graph           │
//! │  - layout table       - role-tagged nodes   │
//! │  - cover/contain fit  - redraw revision     │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod binding;
pub mod element;
pub mod error;
pub mod layout;
pub mod orientation;
pub mod render;
pub mod scene;
pub mod session;
pub mod template;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use binding::{
    BindingOutcome, ControlEvent, ControlId, ControlSet, Editor, FileSelection, PendingUpload,
};
pub use element::{
    is_image_mime, ElementId, ElementKind, Frame, ImageAsset, Origin, Rect, Role, TextAlign,
    TextStyle, VisualElement,
};
pub use error::{EditorError, EditorResult};
pub use layout::{layout, layout_named, TextContent};
pub use orientation::{CanvasSize, Orientation, OrientationDescriptor};
pub use render::{contain_scale, cover_scale, render, sync_text};
pub use scene::{Scene, SceneNode};
pub use session::{ImageSlot, Session, TextField};
pub use template::{TemplateDescriptor, TemplateId};

/// Editor core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
