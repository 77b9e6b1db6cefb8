//! Scene composition and output writers.
//!
//! Every slide goes through one [`SlideRenderer`] which turns a
//! [`RenderRecord`] into a [`Scene`]. Scenes are then written either as one
//! HTML file per slide or as a new PPTX package.
//!
//! # Example
//!
//! ```no_run
//! use redeck::render::{export, ExportFormat, ExportOptions, RenderRecord};
//! use redeck::styles::get_style;
//!
//! let records: Vec<RenderRecord> = Vec::new();
//! let style = get_style("executive_minimal")?;
//! let options = ExportOptions::new().with_format(ExportFormat::Html);
//! export(&records, style, &options, "out".as_ref())?;
//! # Ok::<(), redeck::Error>(())
//! ```

mod design;
mod html;
mod json;
mod pptx;
mod scene;

pub use design::DesignRenderer;
pub use html::HtmlWriter;
pub use json::{to_json, AnalysisReport, JsonFormat, SlideReport};
pub use pptx::PptxWriter;
pub use scene::{
    estimate_text_height, fit_size, Element, Frame, Scene, TextBox, CANVAS_HEIGHT, CANVAS_WIDTH,
};

use crate::error::Result;
use crate::model::{
    ColorPlan, ContentType, Decoration, Emphasis, LayoutPattern, LayoutPlan, PlaceholderRole,
    Slide, TextItem,
};
use crate::styles::StylePreset;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Everything a renderer needs to draw one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRecord {
    pub slide_number: usize,
    pub content_type: ContentType,
    pub layout: LayoutPlan,
    pub colors: ColorPlan,
    pub text_items: Vec<TextItem>,
    pub has_chart: bool,
    pub has_table: bool,
    pub has_images: bool,
    /// Decorations from an accepted advisor directive
    #[serde(default)]
    pub decorations: Vec<Decoration>,
}

impl RenderRecord {
    pub fn new(
        slide: &Slide,
        content_type: ContentType,
        layout: LayoutPlan,
        colors: ColorPlan,
    ) -> Self {
        Self {
            slide_number: slide.slide_number,
            content_type,
            layout,
            colors,
            text_items: slide.text_items.clone(),
            has_chart: slide.has_chart,
            has_table: slide.has_table,
            has_images: slide.has_images(),
            decorations: Vec::new(),
        }
    }

    pub fn with_decorations(mut self, decorations: Vec<Decoration>) -> Self {
        self.decorations = decorations;
        self
    }

    /// Text of the first title or center-title item.
    pub fn title(&self) -> Option<&str> {
        self.text_items
            .iter()
            .find(|t| matches!(t.kind, PlaceholderRole::Title | PlaceholderRole::CenterTitle))
            .map(|t| t.text.as_str())
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.text_items
            .iter()
            .find(|t| t.kind == PlaceholderRole::Subtitle)
            .map(|t| t.text.as_str())
    }

    pub fn body(&self) -> Vec<&str> {
        self.text_items
            .iter()
            .filter(|t| t.is_body())
            .map(|t| t.text.as_str())
            .collect()
    }

    /// Title, or a generic label when the slide has none.
    pub fn display_title(&self) -> String {
        self.title()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Slide {}", self.slide_number))
    }
}

/// Visual treatment of the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStyle {
    /// Flat bars and lines
    #[default]
    Classic,
    /// Rounded panels and circles
    Cards,
}

impl RenderStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStyle::Classic => "classic",
            RenderStyle::Cards => "cards",
        }
    }
}

impl FromStr for RenderStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(RenderStyle::Classic),
            "cards" => Ok(RenderStyle::Cards),
            other => Err(format!("unknown render style: {}", other)),
        }
    }
}

impl fmt::Display for RenderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slide composition chosen from the layout plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Hero,
    Split,
    Grid,
    Cards,
    Closing,
    SectionBreak,
}

/// Above this many body items a title/body slide becomes a grid.
const GRID_THRESHOLD: usize = 5;

impl Variant {
    pub fn select(record: &RenderRecord) -> Self {
        let closing = record.content_type == ContentType::Closing
            || record.layout.emphasis == Some(Emphasis::High);
        match record.layout.pattern {
            LayoutPattern::Centered if closing => Variant::Closing,
            LayoutPattern::Centered => Variant::Hero,
            LayoutPattern::Split
            | LayoutPattern::SideBySide
            | LayoutPattern::TwoColumnContent => Variant::Split,
            LayoutPattern::HorizontalFlow | LayoutPattern::HorizontalTimeline => Variant::Cards,
            LayoutPattern::TitleBody => match record.body().len() {
                0 => Variant::SectionBreak,
                n if n > GRID_THRESHOLD => Variant::Grid,
                _ => Variant::Cards,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Hero => "hero",
            Variant::Split => "split",
            Variant::Grid => "grid",
            Variant::Cards => "cards",
            Variant::Closing => "closing",
            Variant::SectionBreak => "section_break",
        }
    }
}

/// Produces a scene for one slide.
pub trait SlideRenderer: Send + Sync {
    fn render(&self, record: &RenderRecord, style: &StylePreset) -> Result<Scene>;
}

/// Output format of an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Pptx,
    /// A directory of `slideN.html` files
    Html,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pptx" => Ok(ExportFormat::Pptx),
            "html" => Ok(ExportFormat::Html),
            other => Err(format!("unknown export format: {}", other)),
        }
    }
}

/// Options for exporting a redesigned deck.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub render_style: RenderStyle,
    /// Document title written to the package properties
    pub title: Option<String>,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_render_style(mut self, style: RenderStyle) -> Self {
        self.render_style = style;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Render every record, substituting a placeholder for failed slides.
///
/// Always returns at least one scene.
pub fn render_scenes(
    renderer: &dyn SlideRenderer,
    records: &[RenderRecord],
    style: &StylePreset,
    fallback_title: &str,
) -> Vec<Scene> {
    if records.is_empty() {
        tracing::debug!("no slides to render, writing a placeholder");
        return vec![Scene::placeholder(1, fallback_title)];
    }

    records
        .iter()
        .map(|record| match renderer.render(record, style) {
            Ok(scene) => scene,
            Err(e) => {
                tracing::warn!(
                    slide = record.slide_number,
                    "render failed, using placeholder: {}",
                    e
                );
                Scene::placeholder(record.slide_number, &record.display_title())
            }
        })
        .collect()
}

/// Export records with the built-in [`DesignRenderer`].
///
/// For PPTX `output` is the package path; for HTML it is a directory.
pub fn export(
    records: &[RenderRecord],
    style: &StylePreset,
    options: &ExportOptions,
    output: &Path,
) -> Result<PathBuf> {
    let renderer = DesignRenderer::new(options.render_style);
    export_with(&renderer, records, style, options, output)
}

/// Export records through any renderer.
pub fn export_with(
    renderer: &dyn SlideRenderer,
    records: &[RenderRecord],
    style: &StylePreset,
    options: &ExportOptions,
    output: &Path,
) -> Result<PathBuf> {
    let title = options.title.as_deref().unwrap_or("Untitled");
    let scenes = render_scenes(renderer, records, style, title);

    match options.format {
        ExportFormat::Pptx => PptxWriter::new().with_title(title).write(&scenes, output)?,
        ExportFormat::Html => HtmlWriter::new().with_title(title).write(&scenes, output)?,
    }

    tracing::info!(
        slides = scenes.len(),
        format = ?options.format,
        style = style.id,
        "deck exported to {}",
        output.display()
    );
    Ok(output.to_path_buf())
}
