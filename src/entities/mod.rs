//! Entity types - the data model shared across the toolkit

pub mod job;
pub mod layout;
pub mod part;

pub use job::SavedJob;
pub use layout::{PlacedRect, Sheet, SheetLayout, Side};
pub use part::{EdgeSpec, Part};
