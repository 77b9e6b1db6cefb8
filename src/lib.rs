//! # redeck
//!
//! Slide deck analysis and redesign.
//!
//! This library reads PPTX decks into a typed model, classifies every slide,
//! plans its layout, typography and colors, and re-renders the deck as a new
//! PPTX package or as one HTML file per slide.
//!
//! ## Quick Start
//!
//! ```no_run
//! use redeck::render::{export, ExportOptions};
//! use redeck::styles::get_style;
//!
//! let mut deck = redeck::parse_file("deck.pptx")?;
//! let analyses = redeck::analyze(&mut deck);
//! for analysis in &analyses {
//!     println!("{}: {}", analysis.slide_number, analysis.content_type);
//! }
//!
//! let style = get_style("executive_minimal")?;
//! let records = redeck::pipeline::Pipeline::new().redesign(&deck, &analyses, style);
//! export(&records, style, &ExportOptions::new(), "redesigned.pptx".as_ref())?;
//! # Ok::<(), redeck::Error>(())
//! ```
//!
//! ## Sessions
//!
//! [`pipeline::Service`] drives a deck through upload, parse, analyze,
//! redesign, export and download, keeping per-deck state in a
//! [`session::SessionStore`].
//!
//! ## Design advisor
//!
//! A [`advisor::DesignAdvisor`] may refine the planner's layouts. Its answer is
//! validated slide by slide and any failure or timeout falls back to the
//! planner's output.

pub mod advisor;
pub mod analysis;
pub mod container;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod pptx;
pub mod render;
pub mod session;
pub mod styles;

// Re-exports
pub use advisor::{AdvisorError, AdvisorOptions, DesignAdvisor, ProcessAdvisor};
pub use analysis::SlideAnalysis;
pub use container::{OoxmlContainer, Relationship, Relationships};
pub use error::{Error, Result};
pub use model::{
    AspectRatio, ColorPlan, ContentType, Deck, LayoutPattern, LayoutPlan, Metadata, Slide,
    TextItem,
};
pub use pipeline::{Pipeline, Service};
pub use pptx::{DeckReader, ReaderOptions};
pub use render::{ExportFormat, ExportOptions, RenderRecord, RenderStyle};
pub use session::{Session, SessionStatus, SessionStore};
pub use styles::{get_style, StylePreset};

use std::path::Path;

/// Parse a PPTX file with the default options.
///
/// # Example
///
/// ```no_run
/// let deck = redeck::parse_file("deck.pptx")?;
/// println!("Slides: {}", deck.slide_count());
/// # Ok::<(), redeck::Error>(())
/// ```
pub fn parse_file(path: impl AsRef<Path>) -> Result<Deck> {
    DeckReader::open(path, ReaderOptions::default())?.read()
}

/// Parse a PPTX package held in memory.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("deck.pptx")?;
/// let deck = redeck::parse_bytes(&data)?;
/// # Ok::<(), redeck::Error>(())
/// ```
pub fn parse_bytes(data: &[u8]) -> Result<Deck> {
    DeckReader::from_bytes(data.to_vec(), ReaderOptions::default())?.read()
}

/// Classify and plan every slide of a deck.
pub fn analyze(deck: &mut Deck) -> Vec<SlideAnalysis> {
    analysis::analyze_deck(deck)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bytes_rejects_garbage() {
        let result = parse_bytes(b"definitely not a zip");
        assert!(matches!(result, Err(Error::MalformedDocument(_))));
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file("does/not/exist.pptx");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
