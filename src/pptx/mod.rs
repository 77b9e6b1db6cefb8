//! PPTX (PowerPoint) deck reading.
//!
//! [`DeckReader`] opens the package, resolves the slide parts in their
//! declared order and hands each one to the streaming extractor in
//! [`extract`]. The theme palette comes from [`theme`].

pub mod extract;
mod reader;
pub mod theme;

pub use extract::{extract_slide, text_items};
pub use reader::{DeckReader, ReaderOptions};
