//! Saved job entity - a historical cut list snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::part::Part;

/// A saved cabinet job
///
/// Written once on explicit save and never mutated; the part list is a
/// snapshot and later edits to a working cut list do not touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedJob {
    /// Store row id (SQLite rowid)
    pub id: i64,

    /// Cabinet category this job belongs to, e.g. "wardrobe"
    pub cabinet_type: String,

    /// Overall cabinet width at save time, mm
    pub base_width: f64,

    /// Overall cabinet height at save time, mm
    pub base_height: f64,

    /// Board thickness, mm
    pub thickness: f64,

    /// Part list snapshot
    pub parts: Vec<Part>,

    /// Save timestamp
    pub created: DateTime<Utc>,
}
