//! Cutplan: cabinet shop panel cutting toolkit
//!
//! Turns a cut list into a nesting plan on fixed-size stock sheets, resolves
//! per-panel edge-banding, estimates material cost, and predicts part lists
//! for new jobs from saved history.

pub mod cli;
pub mod core;
pub mod cutlist;
pub mod entities;
pub mod history;
pub mod templates;
