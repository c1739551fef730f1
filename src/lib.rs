//! scrolldeck: reactive machinery for long-form, single-page decks.
//!
//! The crate tracks which content section is in focus while scrolling,
//! owns the create/destroy cycle of chart render targets, and runs one-shot
//! reveal counters. Platform primitives (visibility reporting, animation
//! frames, scrolling, chart drawing) sit behind traits so the same logic runs
//! in a browser adapter or fully headless.

pub mod api;
pub mod content;
pub mod core;
pub mod error;
pub mod platform;
pub mod render;
pub mod telemetry;

pub use api::{DeckConfig, DeckPage};
pub use error::{DeckError, DeckResult};
