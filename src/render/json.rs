//! JSON analysis report.

use crate::analysis::{plan_colors, SlideAnalysis};
use crate::error::Result;
use crate::model::{AspectRatio, ColorPlan, ContentType, Deck, LayoutPlan, Metadata, ThemeColors};
use crate::styles::StylePreset;
use serde::{Deserialize, Serialize};

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Per-slide entry of an [`AnalysisReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideReport {
    pub slide_number: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content_type: ContentType,
    pub layout: LayoutPlan,
    pub body_count: usize,
    pub total_chars: usize,
    pub has_chart: bool,
    pub has_table: bool,
    pub has_images: bool,
    /// Present once a style has been chosen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorPlan>,
}

/// Deck-level summary of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: Metadata,
    pub width_px: u32,
    pub height_px: u32,
    pub aspect_ratio: AspectRatio,
    pub slide_count: usize,
    pub theme: ThemeColors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub slides: Vec<SlideReport>,
}

impl AnalysisReport {
    /// Pair each slide with its analysis by slide number.
    pub fn new(deck: &Deck, analyses: &[SlideAnalysis]) -> Self {
        let slides = analyses
            .iter()
            .filter_map(|analysis| {
                let slide = deck
                    .slides
                    .iter()
                    .find(|s| s.slide_number == analysis.slide_number)?;
                Some(SlideReport {
                    slide_number: analysis.slide_number,
                    title: slide.title(),
                    content_type: analysis.content_type,
                    layout: analysis.layout.clone(),
                    body_count: analysis.body_count,
                    total_chars: analysis.total_chars,
                    has_chart: slide.has_chart,
                    has_table: slide.has_table,
                    has_images: slide.has_images(),
                    colors: None,
                })
            })
            .collect();

        Self {
            metadata: deck.metadata.clone(),
            width_px: deck.width_px,
            height_px: deck.height_px,
            aspect_ratio: deck.aspect_ratio,
            slide_count: deck.slide_count(),
            theme: deck.theme.clone(),
            style: None,
            slides,
        }
    }

    /// Add the color plan of every slide under a style.
    pub fn with_colors(mut self, style: &StylePreset) -> Self {
        for slide in &mut self.slides {
            slide.colors = Some(plan_colors(&style.theme, slide.content_type));
        }
        self.style = Some(style.id.to_string());
        self
    }
}

/// Serialize any report value.
pub fn to_json<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Compact => serde_json::to_string(value)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
    };
    Ok(json)
}
