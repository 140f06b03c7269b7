//! SVG serialization of editor scenes.
//!
//! The SVG document is both the live preview frame and the intermediate
//! representation that export rasterizes.

use std::fmt::Write;

use adcraft_core::{ElementKind, Scene, TextAlign, VisualElement};

/// Fraction of the font size between the vertical center and the baseline.
const BASELINE_SHIFT: f32 = 0.35;

/// Serialize `scene` into an SVG document of `out_width` x `out_height`
/// pixels. The view box always spans the scene viewport.
#[must_use]
pub fn scene_to_svg(scene: &Scene, out_width: u32, out_height: u32, background: &str) -> String {
    let mut svg = String::with_capacity(4096);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_width}\" height=\"{out_height}\" viewBox=\"0 0 {} {}\">",
        scene.viewport_width, scene.viewport_height,
    );

    let _ = write!(
        svg,
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(background),
    );

    for (index, element) in scene.elements().enumerate() {
        render_element_svg(&mut svg, element, index);
    }

    svg.push_str("</svg>");
    svg
}

/// Render a single element to SVG.
fn render_element_svg(svg: &mut String, element: &VisualElement, index: usize) {
    let b = element.frame.bounds();

    match &element.kind {
        ElementKind::Rect {
            fill,
            corner_radius,
        } => {
            let _ = write!(
                svg,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{corner_radius}\" fill=\"{}\"/>",
                b.x,
                b.y,
                b.width,
                b.height,
                escape_xml(fill),
            );
        }

        ElementKind::Text { content, style } => {
            let (x, anchor) = match style.align {
                TextAlign::Left => (b.x, "start"),
                TextAlign::Center => (b.x + b.width / 2.0, "middle"),
                TextAlign::Right => (b.x + b.width, "end"),
            };
            let y = b.y + b.height / 2.0 + style.font_size * BASELINE_SHIFT;
            let _ = write!(
                svg,
                "<text x=\"{x}\" y=\"{y}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" fill=\"{}\" text-anchor=\"{anchor}\">{}</text>",
                escape_xml(&style.font_family),
                style.font_size,
                style.font_weight,
                escape_xml(&style.color),
                escape_xml(content),
            );
        }

        ElementKind::Image { asset, clip, .. } => {
            let clip_attr = match clip {
                Some(c) => {
                    let _ = write!(
                        svg,
                        "<defs><clipPath id=\"clip-{index}\"><rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/></clipPath></defs>",
                        c.x, c.y, c.width, c.height,
                    );
                    format!(" clip-path=\"url(#clip-{index})\"")
                }
                None => String::new(),
            };
            let _ = write!(
                svg,
                "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"none\" href=\"{}\"{clip_attr}/>",
                b.x,
                b.y,
                b.width,
                b.height,
                escape_xml(&asset.data_url),
            );
        }
    }

    tracing::trace!("SVG {:?} at ({}, {}) {}x{}", element.role, b.x, b.y, b.width, b.height);
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use adcraft_core::{render, ImageAsset, ImageSlot, Session, TemplateId, TextField};

    fn rendered(session: &Session) -> Scene {
        let mut scene = Scene::default();
        render(&mut scene, session);
        scene
    }

    #[test]
    fn test_empty_scene_document() {
        let scene = Scene::new(400.0, 500.0);
        let svg = scene_to_svg(&scene, 400, 500, "#ffffff");
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("width=\"400\""));
        assert!(svg.contains("viewBox=\"0 0 400 500\""));
        assert!(svg.contains("fill=\"#ffffff\""));
    }

    #[test]
    fn test_template_text_is_written() {
        let session = Session::new().with_text(TextField::Title, "Summer Sale");
        let svg = scene_to_svg(&rendered(&session), 400, 500, "#ffffff");
        assert!(svg.contains("Summer Sale"));
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains("font-weight=\"700\""));
        assert!(svg.contains("Main Image"));
    }

    #[test]
    fn test_xml_escaping() {
        let session = Session::new().with_text(TextField::Subtitle, "A < B & \"C\"");
        let svg = scene_to_svg(&rendered(&session), 400, 500, "#ffffff");
        assert!(svg.contains("A &lt; B &amp; &quot;C&quot;"));
    }

    #[test]
    fn test_clipped_image_gets_clip_path() {
        let asset = ImageAsset::new("image/png", 10, 10, "data:image/png;base64,AA==").expect("asset");
        let session = Session::new()
            .with_template(TemplateId::SplitTop)
            .with_image(ImageSlot::MainImage, asset);
        let svg = scene_to_svg(&rendered(&session), 400, 500, "#ffffff");
        assert!(svg.contains("<clipPath id=\"clip-0\">"));
        assert!(svg.contains("clip-path=\"url(#clip-0)\""));
        assert!(svg.contains("href=\"data:image/png;base64,AA==\""));
        assert!(!svg.contains("Main Image"));
    }

    #[test]
    fn test_classic_image_is_unclipped() {
        let asset = ImageAsset::new("image/png", 10, 10, "data:image/png;base64,AA==").expect("asset");
        let session = Session::new().with_image(ImageSlot::MainImage, asset);
        let svg = scene_to_svg(&rendered(&session), 400, 500, "#ffffff");
        assert!(svg.contains("<image"));
        assert!(!svg.contains("clipPath"));
    }

    #[test]
    fn test_scaled_output_keeps_viewbox() {
        let scene = Scene::new(100.0, 100.0);
        let svg = scene_to_svg(&scene, 200, 200, "#ffffff");
        assert!(svg.contains("width=\"200\""));
        assert!(svg.contains("viewBox=\"0 0 100 100\""));
    }
}
