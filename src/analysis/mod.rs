//! Deterministic slide analysis: classification, layout and color planning.
//!
//! Everything here is a pure function of its inputs. The design advisor may
//! later replace a slide's [`LayoutPlan`], but these results are always the
//! authoritative fallback.

mod classify;
mod color;
mod layout;

pub use classify::classify;
pub use color::{
    ensure_contrast, is_dark, luminance, parse_hex, plan_colors, resolve_hex, DARK_TEXT,
    LIGHT_TEXT,
};
pub use layout::{font_sizes, pattern_defaults, plan_layout};

use crate::model::{ContentType, Deck, LayoutPlan, Slide};
use serde::{Deserialize, Serialize};

/// Analysis result for one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideAnalysis {
    pub slide_number: usize,
    pub content_type: ContentType,
    pub layout: LayoutPlan,
    /// Body-typed TextItems
    pub body_count: usize,
    /// Characters over all TextItems
    pub total_chars: usize,
}

/// Classify and plan one slide against a canvas size in pixels.
pub fn analyze_slide(slide: &Slide, width: f64, height: f64) -> SlideAnalysis {
    let content_type = classify(slide);
    let body_count = slide.body_count();
    let total_chars = slide.total_chars();
    let fonts = font_sizes(total_chars, width, height);

    SlideAnalysis {
        slide_number: slide.slide_number,
        content_type,
        layout: plan_layout(content_type, body_count, fonts),
        body_count,
        total_chars,
    }
}

/// Analyze every slide and record its content type on the deck.
pub fn analyze_deck(deck: &mut Deck) -> Vec<SlideAnalysis> {
    let (width, height) = (f64::from(deck.width_px), f64::from(deck.height_px));
    let analyses: Vec<SlideAnalysis> = deck
        .slides
        .iter_mut()
        .map(|slide| {
            let analysis = analyze_slide(slide, width, height);
            slide.layout_type = Some(analysis.content_type);
            analysis
        })
        .collect();

    tracing::info!(slides = analyses.len(), "deck analyzed");
    analyses
}
