//! Command implementations

pub mod completions;
pub mod export;
pub mod history;
pub mod pack;
pub mod predict;
pub mod template;
