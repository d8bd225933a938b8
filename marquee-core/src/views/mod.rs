//! Presentation controllers.
//!
//! Controllers translate user intents into URL-state deltas and read the
//! media store for display. They never write the store; the orchestrator
//! does that in response to the URL change.

mod filter_bar;
mod grid;
mod paginator;
mod search_box;

pub use filter_bar::{FilterBar, FilterKey};
pub use grid::{GridRow, GridView};
pub use paginator::Paginator;
pub use search_box::SearchBox;
