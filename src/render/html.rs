//! HTML writer: one self-contained `slideN.html` per scene.

use super::scene::{Element, Frame, Scene, TextBox, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::error::Result;
use crate::model::Alignment;
use std::fs;
use std::path::Path;

const PX_PER_INCH: f64 = 96.0;
const PX_PER_POINT: f64 = 96.0 / 72.0;

/// Writes scenes as absolutely positioned HTML in 96-DPI pixels.
#[derive(Debug, Clone, Default)]
pub struct HtmlWriter {
    title: Option<String>,
}

impl HtmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Write `slide1.html`, `slide2.html`... as the whole content of `dir`.
    ///
    /// Slides are staged in a temporary directory next to `dir` and swapped
    /// in once all of them are written. Any previous content of `dir` is
    /// replaced; on error it is left untouched and the staging directory is
    /// removed.
    pub fn write(&self, scenes: &[Scene], dir: &Path) -> Result<()> {
        let parent = match dir.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let staging = tempfile::Builder::new()
            .prefix(".redeck-html-")
            .tempdir_in(parent)?;
        for (i, scene) in scenes.iter().enumerate() {
            let path = staging.path().join(format!("slide{}.html", i + 1));
            fs::write(&path, self.render_scene(scene, i + 1))?;
        }

        if dir.is_dir() {
            fs::remove_dir_all(dir)?;
        } else if dir.exists() {
            fs::remove_file(dir)?;
        }
        fs::rename(staging.path(), dir)?;
        // The staging path no longer exists, so dropping the guard is a no-op.
        drop(staging);

        tracing::debug!(slides = scenes.len(), "wrote html to {}", dir.display());
        Ok(())
    }

    /// Markup of one slide.
    pub fn render_scene(&self, scene: &Scene, number: usize) -> String {
        let page_title = match &self.title {
            Some(title) => format!("{} - Slide {}", title, number),
            None => format!("Slide {}", number),
        };

        let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(&page_title)));
        html.push_str("<style>\nbody { margin: 0; }\n");
        html.push_str(&format!(
            ".slide {{ position: relative; overflow: hidden; width: {}px; height: {}px; background: {}; }}\n",
            px(CANVAS_WIDTH),
            px(CANVAS_HEIGHT),
            escape_html(&scene.background)
        ));
        html.push_str(".slide > div { position: absolute; box-sizing: border-box; }\n");
        html.push_str(".slide p, .slide ul { margin: 0; }\n");
        html.push_str("</style>\n</head>\n<body>\n<div class=\"slide\">\n");

        for element in &scene.elements {
            html.push_str(&render_element(element));
            html.push('\n');
        }

        html.push_str("</div>\n</body>\n</html>\n");
        html
    }
}

fn px(inches: f64) -> String {
    format!("{:.1}", inches * PX_PER_INCH)
}

fn position(frame: &Frame) -> String {
    format!(
        "left: {}px; top: {}px; width: {}px; height: {}px;",
        px(frame.x),
        px(frame.y),
        px(frame.width),
        px(frame.height)
    )
}

fn render_element(element: &Element) -> String {
    match element {
        Element::Rect { frame, fill } => format!(
            "<div style=\"{} background: {};\"></div>",
            position(frame),
            escape_html(fill)
        ),
        Element::RoundedRect { frame, fill } => {
            let radius = frame.width.min(frame.height) * 0.15 * PX_PER_INCH;
            format!(
                "<div style=\"{} background: {}; border-radius: {:.1}px;\"></div>",
                position(frame),
                escape_html(fill),
                radius
            )
        }
        Element::Ellipse { frame, fill } => format!(
            "<div style=\"{} background: {}; border-radius: 50%;\"></div>",
            position(frame),
            escape_html(fill)
        ),
        Element::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            weight,
        } => {
            let (dx, dy) = (x2 - x1, y2 - y1);
            let length = (dx * dx + dy * dy).sqrt();
            let angle = dy.atan2(dx).to_degrees();
            format!(
                "<div style=\"left: {}px; top: {}px; width: {}px; height: {:.1}px; background: {}; transform-origin: 0 0; transform: rotate({:.2}deg);\"></div>",
                px(*x1),
                px(*y1),
                px(length),
                (weight * PX_PER_POINT).max(1.0),
                escape_html(color),
                angle
            )
        }
        Element::Text(text) => render_text(text),
    }
}

fn render_text(text: &TextBox) -> String {
    let align = match text.alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
    };
    let mut style = format!(
        "{} color: {}; font-size: {:.1}px; line-height: 1.2; text-align: {};",
        position(&text.frame),
        escape_html(&text.color),
        f64::from(text.size) * PX_PER_POINT,
        align
    );
    if !text.font.is_empty() {
        style.push_str(&format!(" font-family: '{}', sans-serif;", escape_html(&text.font)));
    }
    if text.bold {
        style.push_str(" font-weight: bold;");
    }

    let mut html = format!("<div style=\"{}\">", style);
    if text.bullets {
        html.push_str("<ul style=\"padding-left: 1.2em;\">");
        for paragraph in &text.paragraphs {
            html.push_str(&format!("<li>{}</li>", escape_html(paragraph)));
        }
        html.push_str("</ul>");
    } else {
        for paragraph in &text.paragraphs {
            html.push_str(&format!("<p>{}</p>", escape_html(paragraph)));
        }
    }
    html.push_str("</div>");
    html
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scene() -> Scene {
        let mut scene = Scene::new(1, "#112233");
        scene.push(Element::rect(Frame::new(0.0, 0.0, 10.0, 0.1), "#ff0000"));
        scene.push(Element::ellipse(Frame::new(1.0, 1.0, 0.5, 0.5), "#00ff00"));
        scene.push(Element::line((1.0, 2.0), (3.0, 2.0), "#0000ff", 3.0));
        scene.push(Element::Text(
            TextBox::new(
                Frame::new(0.5, 0.5, 4.0, 1.0),
                vec!["R&D <2024>".to_string()],
                24,
                "#ffffff",
            )
            .bold(true)
            .align(Alignment::Center),
        ));
        scene.push(Element::Text(
            TextBox::new(
                Frame::new(0.5, 2.5, 4.0, 2.0),
                vec!["One".to_string(), "Two".to_string()],
                18,
                "#ffffff",
            )
            .bullets(true),
        ));
        scene
    }

    #[test]
    fn test_render_scene_markup() {
        let html = HtmlWriter::new().with_title("Deck").render_scene(&scene(), 1);
        assert!(html.contains("<title>Deck - Slide 1</title>"));
        assert!(html.contains("width: 960.0px; height: 540.0px; background: #112233;"));
        assert!(html.contains(
            "left: 0.0px; top: 0.0px; width: 960.0px; height: 9.6px; background: #ff0000;"
        ));
        assert!(html.contains("border-radius: 50%"));
        assert!(html.contains("rotate(0.00deg)"));
        // 24pt is 32px
        assert!(html.contains("font-size: 32.0px"));
        assert!(html.contains("<p>R&amp;D &lt;2024&gt;</p>"));
        assert!(html.contains("text-align: center; font-weight: bold;"));
        assert!(html.contains("<li>One</li><li>Two</li>"));
    }

    #[test]
    fn test_write_one_file_per_slide() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("html");
        let scenes = vec![scene(), Scene::placeholder(7, "Fallback")];
        HtmlWriter::new().write(&scenes, &out).unwrap();

        assert!(out.join("slide1.html").exists());
        // Files are numbered by position, not by source slide number
        let second = std::fs::read_to_string(out.join("slide2.html")).unwrap();
        assert!(second.contains("<p>Fallback</p>"));
        assert!(!out.join("slide3.html").exists());
    }

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_rewrite_replaces_previous_slides() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("html");
        let writer = HtmlWriter::new();

        writer.write(&[scene(), scene(), scene()], &out).unwrap();
        assert_eq!(listing(&out).len(), 3);

        writer.write(&[Scene::placeholder(1, "Only")], &out).unwrap();
        assert_eq!(listing(&out), vec!["slide1.html"]);
        let only = fs::read_to_string(out.join("slide1.html")).unwrap();
        assert!(only.contains("<p>Only</p>"));

        // No staging directories are left next to the output
        assert_eq!(listing(dir.path()), vec!["html"]);
    }

    #[test]
    fn test_failed_write_keeps_previous_output() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("html");
        let writer = HtmlWriter::new();
        writer.write(&[scene(), scene()], &out).unwrap();

        // A file in place of the parent directory makes staging fail
        let blocked = dir.path().join("blocked");
        fs::write(&blocked, b"not a directory").unwrap();
        assert!(writer.write(&[scene()], &blocked.join("html")).is_err());

        assert_eq!(listing(&out), vec!["slide1.html", "slide2.html"]);
        assert_eq!(listing(dir.path()), vec!["blocked", "html"]);
    }
}
