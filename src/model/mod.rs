//! Typed model of a parsed deck and its plans.
//!
//! The reader produces a [`Deck`] of [`Slide`]s; the analysis stage attaches
//! [`ContentType`] labels and derives a [`LayoutPlan`] and [`ColorPlan`] per
//! slide. Every type serializes with serde for the JSON report and the advisor
//! boundary.

mod deck;
mod plan;
mod slide;

pub use deck::*;
pub use plan::*;
pub use slide::*;
