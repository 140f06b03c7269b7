//! WebAssembly bindings for adcraft-core.
//!
//! The browser page forwards control events to [`WasmEditor`] and repaints
//! from the scene JSON. File reading stays in JavaScript: the page checks
//! [`accepts_file`], reads the file as a data URL, and hands the decoded
//! dimensions back through `completeUpload`.

use wasm_bindgen::prelude::*;

use crate::binding::{BindingOutcome, ControlEvent, ControlId, ControlSet, Editor};
use crate::element::{is_image_mime, ImageAsset};
use crate::orientation::Orientation;
use crate::session::{ImageSlot, TextField};
use crate::template::TemplateId;

/// Initialize the editor WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&format!("adcraft-core {} loaded", crate::VERSION).into());
}

/// Template ids in dropdown order.
#[wasm_bindgen(js_name = templateIds)]
#[must_use]
pub fn template_ids() -> js_sys::Array {
    TemplateId::ALL
        .iter()
        .map(|t| JsValue::from_str(t.id()))
        .collect()
}

/// Orientation ids in dropdown order.
#[wasm_bindgen(js_name = orientationIds)]
#[must_use]
pub fn orientation_ids() -> js_sys::Array {
    Orientation::ALL
        .iter()
        .map(|o| JsValue::from_str(o.id()))
        .collect()
}

/// Check whether a file of this MIME type can be uploaded.
#[wasm_bindgen(js_name = acceptsFile)]
#[must_use]
pub fn accepts_file(mime: &str) -> bool {
    is_image_mime(mime)
}

/// Editor instance for WASM.
#[wasm_bindgen]
pub struct WasmEditor {
    editor: Editor,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create an editor listening to every control.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            editor: Editor::new(ControlSet::all()),
        }
    }

    /// Create an editor listening only to the named controls.
    ///
    /// Unknown control names are ignored.
    #[wasm_bindgen(js_name = withControls)]
    #[must_use]
    pub fn with_controls(names: Vec<String>) -> Self {
        let controls: ControlSet = names
            .iter()
            .filter_map(|name| {
                serde_json::from_value::<ControlId>(serde_json::Value::String(name.clone())).ok()
            })
            .collect();
        Self {
            editor: Editor::new(controls),
        }
    }

    /// Handle a template dropdown change. Returns whether anything changed.
    #[wasm_bindgen(js_name = selectTemplate)]
    pub fn select_template(&mut self, id: &str) -> bool {
        changed(&self.editor.handle(ControlEvent::TemplateSelected(id.to_string())))
    }

    /// Handle an orientation dropdown change. Returns whether anything changed.
    #[wasm_bindgen(js_name = selectOrientation)]
    pub fn select_orientation(&mut self, id: &str) -> bool {
        changed(
            &self
                .editor
                .handle(ControlEvent::OrientationSelected(id.to_string())),
        )
    }

    /// Handle a text input change.
    ///
    /// # Errors
    ///
    /// Returns an error string if `field` is not `title`, `subtitle` or `cta`.
    #[wasm_bindgen(js_name = setText)]
    pub fn set_text(&mut self, field: &str, value: &str) -> Result<bool, String> {
        let field = TextField::from_name(field).ok_or_else(|| format!("unknown field: {field}"))?;
        Ok(changed(&self.editor.handle(ControlEvent::TextChanged {
            field,
            value: value.to_string(),
        })))
    }

    /// Store an image the page has decoded.
    ///
    /// # Errors
    ///
    /// Returns an error string if the slot is unknown or the image is invalid.
    #[wasm_bindgen(js_name = completeUpload)]
    pub fn complete_upload(
        &mut self,
        slot: &str,
        mime: &str,
        width: u32,
        height: u32,
        data_url: &str,
    ) -> Result<(), String> {
        let slot = ImageSlot::from_name(slot).ok_or_else(|| format!("unknown slot: {slot}"))?;
        let asset = ImageAsset::new(mime, width, height, data_url).map_err(|e| e.to_string())?;
        self.editor.complete_upload(slot, asset);
        Ok(())
    }

    /// Get the current scene as JSON.
    #[wasm_bindgen(js_name = getSceneJson)]
    #[must_use]
    pub fn get_scene_json(&self) -> String {
        self.editor.scene().to_json().unwrap_or_default()
    }

    /// Get the current session as JSON.
    #[wasm_bindgen(js_name = getSessionJson)]
    #[must_use]
    pub fn get_session_json(&self) -> String {
        self.editor.session().to_json().unwrap_or_default()
    }

    /// Canvas width in pixels.
    #[wasm_bindgen(js_name = canvasWidth)]
    #[must_use]
    pub fn canvas_width(&self) -> u32 {
        self.editor.session().canvas_size().width
    }

    /// Canvas height in pixels.
    #[wasm_bindgen(js_name = canvasHeight)]
    #[must_use]
    pub fn canvas_height(&self) -> u32 {
        self.editor.session().canvas_size().height
    }

    /// Redraw counter, for skipping repaints.
    #[wasm_bindgen(js_name = revision)]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.editor.scene().revision()
    }
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new()
    }
}

fn changed(outcome: &BindingOutcome) -> bool {
    matches!(
        outcome,
        BindingOutcome::Rerendered | BindingOutcome::TextUpdated
    )
}
