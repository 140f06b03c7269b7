//! Template layout table.
//!
//! Maps a template, a canvas size and the current text to an ordered list of
//! positioned placeholder elements. Every position is a fraction of the canvas
//! width or height, so reflowing after a resize is just another call.
//!
//! | Template     | Main image                     | Title          | Subtitle        |
//! |--------------|--------------------------------|----------------|-----------------|
//! | `classic`    | center (0.5w, 0.3h) 0.8w x 0.4h | (0.5w, 0.7h)  | (0.5w, 0.8h)    |
//! | `splitLeft`  | top-left (0, 0) 0.5w x h        | (0.75w, 0.4h) | (0.75w, 0.55h)  |
//! | `splitRight` | top-left (0.5w, 0) 0.5w x h     | (0.25w, 0.4h) | (0.25w, 0.55h)  |
//! | `splitTop`   | top-left (0, 0) w x 0.5h        | (0.5w, 0.65h) | (0.5w, 0.78h)   |
//! | `grid`       | top-left (0, 0) 0.5w x 0.5h     | (0.75w, 0.25h)| (0.25w, 0.75h)  |

use serde::{Deserialize, Serialize};

use crate::element::{Frame, Role, TextAlign, TextStyle, VisualElement};
use crate::TemplateId;

/// Font family used for every text element.
pub const FONT_FAMILY: &str = "Arial";
/// Caption drawn on an empty main image placeholder.
pub const IMAGE_LABEL: &str = "Main Image";

const PLACEHOLDER_FILL: &str = "#e0e0e0";
const LABEL_COLOR: &str = "#666666";
const TITLE_COLOR: &str = "#222222";
const SUBTITLE_COLOR: &str = "#555555";
const CTA_FILL: &str = "#ff6b35";
const CTA_TEXT_COLOR: &str = "#ffffff";
const ACCENT_FILL: &str = "#1f3a5f";

const TITLE_SIZE: f32 = 32.0;
const SUBTITLE_SIZE: f32 = 18.0;
const LABEL_SIZE: f32 = 16.0;
const CTA_SIZE: f32 = 18.0;
const LINE_HEIGHT: f32 = 1.2;

/// User-editable text fed into a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    /// Headline.
    pub title: String,
    /// Supporting line.
    pub subtitle: String,
    /// Call-to-action label.
    pub cta: String,
}

impl TextContent {
    /// Create text content.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        cta: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            cta: cta.into(),
        }
    }
}

impl Default for TextContent {
    fn default() -> Self {
        Self::new("Your Headline Here", "Supporting text goes here", "Shop Now")
    }
}

/// Lay out a template on a canvas of the given size.
///
/// Pure: equal arguments always produce equal element lists.
#[must_use]
pub fn layout(
    template: TemplateId,
    width: f32,
    height: f32,
    content: &TextContent,
) -> Vec<VisualElement> {
    let g = Grid {
        w: width,
        h: height,
    };
    match template {
        TemplateId::Classic => classic(g, content),
        TemplateId::SplitLeft => split_horizontal(g, content, 0.0, 0.75),
        TemplateId::SplitRight => split_horizontal(g, content, 0.5, 0.25),
        TemplateId::SplitTop => split_top(g, content),
        TemplateId::Grid => grid(g, content),
    }
}

/// Lay out a template named by its control identifier.
///
/// Unknown identifiers use the `classic` arrangement.
#[must_use]
pub fn layout_named(
    template_id: &str,
    width: f32,
    height: f32,
    content: &TextContent,
) -> Vec<VisualElement> {
    layout(TemplateId::resolve(template_id), width, height, content)
}

#[derive(Debug, Clone, Copy)]
struct Grid {
    w: f32,
    h: f32,
}

impl Grid {
    fn x(self, fraction: f32) -> f32 {
        self.w * fraction
    }

    fn y(self, fraction: f32) -> f32 {
        self.h * fraction
    }
}

fn classic(g: Grid, content: &TextContent) -> Vec<VisualElement> {
    let mut elements = placeholder(Frame::centered(g.x(0.5), g.y(0.3), g.x(0.8), g.y(0.4)));
    elements.push(title(content, g.x(0.5), g.y(0.7), g.x(0.9)));
    elements.push(subtitle(content, g.x(0.5), g.y(0.8), g.x(0.9)));

    let button = Frame::centered(g.x(0.5), g.y(0.9), g.x(0.4), g.y(0.08));
    elements.push(VisualElement::rect(Role::CtaButton, button, CTA_FILL).with_corner_radius(6.0));
    elements.push(VisualElement::text(
        Role::Cta,
        Frame::centered(button.x, button.y, button.width, text_height(CTA_SIZE)),
        content.cta.clone(),
        style(CTA_SIZE, 700, CTA_TEXT_COLOR),
    ));
    elements
}

/// Half-width image column at `image_x`, text column centered at `text_x`.
fn split_horizontal(g: Grid, content: &TextContent, image_x: f32, text_x: f32) -> Vec<VisualElement> {
    let mut elements = placeholder(Frame::top_left(g.x(image_x), 0.0, g.x(0.5), g.y(1.0)));
    elements.push(title(content, g.x(text_x), g.y(0.4), g.x(0.45)));
    elements.push(subtitle(content, g.x(text_x), g.y(0.55), g.x(0.45)));
    elements
}

fn split_top(g: Grid, content: &TextContent) -> Vec<VisualElement> {
    let mut elements = placeholder(Frame::top_left(0.0, 0.0, g.x(1.0), g.y(0.5)));
    elements.push(title(content, g.x(0.5), g.y(0.65), g.x(0.9)));
    elements.push(subtitle(content, g.x(0.5), g.y(0.78), g.x(0.9)));
    elements
}

fn grid(g: Grid, content: &TextContent) -> Vec<VisualElement> {
    let mut elements = placeholder(Frame::top_left(0.0, 0.0, g.x(0.5), g.y(0.5)));
    elements.push(VisualElement::rect(
        Role::Accent,
        Frame::top_left(g.x(0.5), g.y(0.5), g.x(0.5), g.y(0.5)),
        ACCENT_FILL,
    ));
    elements.push(title(content, g.x(0.75), g.y(0.25), g.x(0.45)));
    elements.push(subtitle(content, g.x(0.25), g.y(0.75), g.x(0.45)));
    elements
}

/// Main image rectangle plus its caption, centered on the rectangle.
fn placeholder(frame: Frame) -> Vec<VisualElement> {
    let (cx, cy) = frame.bounds().center();
    vec![
        VisualElement::rect(Role::MainImage, frame, PLACEHOLDER_FILL),
        VisualElement::text(
            Role::ImageLabel,
            Frame::centered(cx, cy, frame.width, text_height(LABEL_SIZE)),
            IMAGE_LABEL,
            style(LABEL_SIZE, 400, LABEL_COLOR),
        ),
    ]
}

fn title(content: &TextContent, x: f32, y: f32, width: f32) -> VisualElement {
    VisualElement::text(
        Role::Title,
        Frame::centered(x, y, width, text_height(TITLE_SIZE)),
        content.title.clone(),
        style(TITLE_SIZE, 700, TITLE_COLOR),
    )
}

fn subtitle(content: &TextContent, x: f32, y: f32, width: f32) -> VisualElement {
    VisualElement::text(
        Role::Subtitle,
        Frame::centered(x, y, width, text_height(SUBTITLE_SIZE)),
        content.subtitle.clone(),
        style(SUBTITLE_SIZE, 400, SUBTITLE_COLOR),
    )
}

fn style(font_size: f32, font_weight: u16, color: &str) -> TextStyle {
    TextStyle {
        font_family: FONT_FAMILY.to_string(),
        font_size,
        font_weight,
        align: TextAlign::Center,
        color: color.to_string(),
    }
}

fn text_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT
}
