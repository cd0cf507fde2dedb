//! Parts snapshot serialization
//!
//! Snapshots are stored as a JSON array in a single TEXT column.
//! serde_json emits the shortest f64 representation that parses back to the
//! identical value, so a decoded snapshot equals the saved one well inside
//! the 1e-6 mm tolerance the store promises.

use crate::entities::part::Part;

/// Encode a part list for storage
pub fn encode_parts(parts: &[Part]) -> Result<String, serde_json::Error> {
    serde_json::to_string(parts)
}

/// Decode a stored part list
pub fn decode_parts(json: &str) -> Result<Vec<Part>, serde_json::Error> {
    serde_json::from_str(json)
}
