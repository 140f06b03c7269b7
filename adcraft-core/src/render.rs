//! Render/sync driver.
//!
//! Rebuilds a [`Scene`] from a [`Session`]: clear, background, template
//! layout, uploaded images, redraw. Running it twice with the same session
//! leaves the scene with the same contents.

use crate::element::{ElementKind, Frame, ImageAsset, Rect, Role, VisualElement};
use crate::layout::layout;
use crate::scene::DEFAULT_BACKGROUND;
use crate::{Scene, Session};

/// Logo box as fractions of the canvas: x, y, width, height.
const LOGO_BOX: [f32; 4] = [0.04, 0.04, 0.2, 0.1];

/// Rebuild `scene` from `session` and request a redraw.
pub fn render(scene: &mut Scene, session: &Session) {
    let size = session.canvas_size();
    let (width, height) = (size.width_f32(), size.height_f32());

    scene.clear_elements();
    scene.set_viewport(width, height);
    scene.set_background(DEFAULT_BACKGROUND);

    let template = session.template();
    let elements = layout(template, width, height, session.content());

    for element in elements {
        match (element.role, session.main_image()) {
            (Role::ImageLabel, Some(_)) => {}
            (Role::MainImage, Some(asset)) => {
                match place_image(&element, asset, template.clips_main_image()) {
                    Some(image) => {
                        scene.add_element(image);
                    }
                    None => {
                        tracing::warn!("Main image has no usable size, keeping placeholder");
                        scene.add_element(element);
                    }
                }
            }
            _ => {
                scene.add_element(element);
            }
        }
    }

    if let Some(logo) = session.logo() {
        if let Some(element) = place_logo(logo, width, height) {
            scene.add_element(element);
        }
    }

    scene.request_redraw();
    tracing::debug!(
        "Rendered template {} at {}x{}: {} elements (revision {})",
        template,
        size.width,
        size.height,
        scene.element_count(),
        scene.revision()
    );
}

/// Replace the text of the element with `role` and request a redraw.
///
/// Returns `false`, leaving the scene untouched, when no text element has
/// that role.
pub fn sync_text(scene: &mut Scene, role: Role, text: &str) -> bool {
    let Some(element) = scene.find_by_role_mut(role) else {
        return false;
    };
    let ElementKind::Text { content, .. } = &mut element.kind else {
        return false;
    };
    text.clone_into(content);
    scene.request_redraw();
    tracing::trace!("Updated {role:?} text in place");
    true
}

/// Uniform scale that makes an image fill a box, cropping the overflow.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn cover_scale(box_width: f32, box_height: f32, image_width: u32, image_height: u32) -> f32 {
    let sx = box_width / image_width as f32;
    let sy = box_height / image_height as f32;
    sx.max(sy)
}

/// Uniform scale that makes an image fit entirely inside a box.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn contain_scale(box_width: f32, box_height: f32, image_width: u32, image_height: u32) -> f32 {
    let sx = box_width / image_width as f32;
    let sy = box_height / image_height as f32;
    sx.min(sy)
}

/// Cover-fit `asset` into the placeholder's bounds, centered on them.
#[allow(clippy::cast_precision_loss)]
fn place_image(placeholder: &VisualElement, asset: &ImageAsset, clip: bool) -> Option<VisualElement> {
    if asset.width == 0 || asset.height == 0 {
        return None;
    }
    let bounds = placeholder.frame.bounds();
    let scale = cover_scale(bounds.width, bounds.height, asset.width, asset.height);
    let (cx, cy) = bounds.center();

    Some(VisualElement {
        role: Role::MainImage,
        frame: Frame::centered(
            cx,
            cy,
            asset.width as f32 * scale,
            asset.height as f32 * scale,
        ),
        kind: ElementKind::Image {
            asset: asset.clone(),
            scale,
            clip: clip.then_some(bounds),
        },
    })
}

#[allow(clippy::cast_precision_loss)]
fn place_logo(asset: &ImageAsset, width: f32, height: f32) -> Option<VisualElement> {
    if asset.width == 0 || asset.height == 0 {
        return None;
    }
    let [fx, fy, fw, fh] = LOGO_BOX;
    let area = Rect::new(width * fx, height * fy, width * fw, height * fh);
    let scale = contain_scale(area.width, area.height, asset.width, asset.height);

    Some(VisualElement {
        role: Role::Logo,
        frame: Frame::top_left(
            area.x,
            area.y,
            asset.width as f32 * scale,
            asset.height as f32 * scale,
        ),
        kind: ElementKind::Image {
            asset: asset.clone(),
            scale,
            clip: None,
        },
    })
}
