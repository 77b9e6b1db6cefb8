//! Format-neutral slide scenes.
//!
//! A [`Scene`] is a flat list of positioned primitives on a fixed
//! 10 x 5.625 inch canvas. Both writers consume scenes, so layout decisions
//! are made once.

use crate::model::Alignment;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

/// Canvas width in inches.
pub const CANVAS_WIDTH: f64 = 10.0;
/// Canvas height in inches.
pub const CANVAS_HEIGHT: f64 = 5.625;

const LINE_SPACING: f64 = 1.2;
/// Average glyph advance of a single-width character, in ems.
const AVG_CHAR_EM: f64 = 0.5;
const POINTS_PER_INCH: f64 = 72.0;

/// A rectangle in inches, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Shrink by `pad` inches on every side.
    pub fn inset(&self, pad: f64) -> Self {
        Self::new(
            self.x + pad,
            self.y + pad,
            (self.width - 2.0 * pad).max(0.0),
            (self.height - 2.0 * pad).max(0.0),
        )
    }
}

/// A text box. Sizes are points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBox {
    pub frame: Frame,
    pub paragraphs: Vec<String>,
    pub size: u32,
    pub color: String,
    pub bold: bool,
    pub alignment: Alignment,
    /// Prefix every paragraph with a bullet
    pub bullets: bool,
    pub font: String,
}

impl TextBox {
    pub fn new(frame: Frame, paragraphs: Vec<String>, size: u32, color: impl Into<String>) -> Self {
        Self {
            frame,
            paragraphs,
            size,
            color: color.into(),
            bold: false,
            alignment: Alignment::Left,
            bullets: false,
            font: String::new(),
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn bullets(mut self, bullets: bool) -> Self {
        self.bullets = bullets;
        self
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    pub fn text(&self) -> String {
        self.paragraphs.join("\n")
    }
}

/// A drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Rect { frame: Frame, fill: String },
    RoundedRect { frame: Frame, fill: String },
    Ellipse { frame: Frame, fill: String },
    /// Straight line; `weight` in points
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: String,
        weight: f64,
    },
    Text(TextBox),
}

impl Element {
    pub fn rect(frame: Frame, fill: impl Into<String>) -> Self {
        Element::Rect {
            frame,
            fill: fill.into(),
        }
    }

    pub fn rounded(frame: Frame, fill: impl Into<String>) -> Self {
        Element::RoundedRect {
            frame,
            fill: fill.into(),
        }
    }

    pub fn ellipse(frame: Frame, fill: impl Into<String>) -> Self {
        Element::Ellipse {
            frame,
            fill: fill.into(),
        }
    }

    pub fn line(from: (f64, f64), to: (f64, f64), color: impl Into<String>, weight: f64) -> Self {
        Element::Line {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            color: color.into(),
            weight,
        }
    }

    /// Bounding frame of the element.
    pub fn frame(&self) -> Frame {
        match self {
            Element::Rect { frame, .. }
            | Element::RoundedRect { frame, .. }
            | Element::Ellipse { frame, .. } => *frame,
            Element::Line { x1, y1, x2, y2, .. } => Frame::new(
                x1.min(*x2),
                y1.min(*y2),
                (x2 - x1).abs(),
                (y2 - y1).abs(),
            ),
            Element::Text(text) => text.frame,
        }
    }
}

/// One rendered slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub slide_number: usize,
    pub background: String,
    pub elements: Vec<Element>,
    /// Set when the scene stands in for a slide that failed to render
    pub placeholder: bool,
}

impl Scene {
    pub fn new(slide_number: usize, background: impl Into<String>) -> Self {
        Self {
            slide_number,
            background: background.into(),
            elements: Vec::new(),
            placeholder: false,
        }
    }

    /// Solid background with the title as plain text.
    pub fn placeholder(slide_number: usize, title: &str) -> Self {
        let mut scene = Self::new(slide_number, "#ffffff");
        scene.placeholder = true;
        scene.push(Element::Text(
            TextBox::new(
                Frame::new(0.6, 2.3, CANVAS_WIDTH - 1.2, 1.0),
                vec![title.to_string()],
                32,
                crate::analysis::DARK_TEXT,
            )
            .align(Alignment::Center),
        ));
        scene
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn text_boxes(&self) -> impl Iterator<Item = &TextBox> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text(text) => Some(text),
            _ => None,
        })
    }

    /// All text on the scene in drawing order.
    pub fn all_text(&self) -> Vec<String> {
        self.text_boxes().map(TextBox::text).collect()
    }
}

fn chars_per_line(size: u32, width: f64) -> f64 {
    let em = f64::from(size.max(1)) * AVG_CHAR_EM;
    ((width * POINTS_PER_INCH) / em).floor().max(1.0)
}

/// Estimated height in inches of wrapped paragraphs.
///
/// Wide characters (CJK) count double, as measured by `unicode-width`.
pub fn estimate_text_height(paragraphs: &[String], size: u32, width: f64) -> f64 {
    let per_line = chars_per_line(size, width);
    let lines: f64 = paragraphs
        .iter()
        .map(|p| (p.width() as f64 / per_line).ceil().max(1.0))
        .sum();
    lines.max(1.0) * f64::from(size) * LINE_SPACING / POINTS_PER_INCH
}

/// Largest size from `size` down to `min` whose estimated height fits.
pub fn fit_size(paragraphs: &[String], size: u32, min: u32, width: f64, height: f64) -> u32 {
    let mut current = size.max(min);
    while current > min && estimate_text_height(paragraphs, current, width) > height {
        current -= 1;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_height_grows_with_text() {
        let short = vec!["Hello".to_string()];
        let long = vec!["word ".repeat(60)];
        let h1 = estimate_text_height(&short, 20, 4.0);
        let h2 = estimate_text_height(&long, 20, 4.0);
        assert!((h1 - 20.0 * 1.2 / 72.0).abs() < 1e-9);
        assert!(h2 > h1 * 3.0);
    }

    #[test]
    fn test_wide_characters_count_double() {
        // 4in at 18pt holds 32 single-width columns
        let latin = vec!["a".repeat(20)];
        let cjk = vec!["漢".repeat(20)];
        assert!(estimate_text_height(&cjk, 18, 4.0) > estimate_text_height(&latin, 18, 4.0));
    }

    #[test]
    fn test_fit_size() {
        let text = vec!["lorem ipsum dolor ".repeat(20)];
        let size = fit_size(&text, 28, 12, 4.0, 1.0);
        assert!(size < 28);
        assert!(size >= 12);
        assert_eq!(fit_size(&["Hi".to_string()], 28, 12, 4.0, 1.0), 28);
        // Never below the minimum
        assert_eq!(fit_size(&text, 28, 26, 1.0, 0.1), 26);
    }

    #[test]
    fn test_placeholder_scene() {
        let scene = Scene::placeholder(3, "Revenue");
        assert!(scene.placeholder);
        assert_eq!(scene.slide_number, 3);
        assert_eq!(scene.all_text(), vec!["Revenue"]);
    }

    #[test]
    fn test_line_frame() {
        let line = Element::line((5.0, 1.0), (2.0, 1.0), "#000000", 1.0);
        assert_eq!(line.frame(), Frame::new(2.0, 1.0, 3.0, 0.0));
    }
}
