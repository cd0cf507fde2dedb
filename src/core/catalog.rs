//! Part catalog - normalizes raw cut-list rows into typed parts
//!
//! Rows that fail validation are reported individually with the row number
//! and offending field; a bad row never takes the rest of the file with it.

use crate::core::packing::{RejectReason, Rejection};
use crate::cutlist::PartRow;
use crate::entities::part::{EdgeSpec, Part};

/// Validated parts plus per-row rejections
#[derive(Debug, Clone)]
pub struct CatalogReport {
    pub parts: Vec<Part>,
    pub rejected: Vec<Rejection>,
}

impl CatalogReport {
    /// Total quantity instances across accepted parts
    pub fn instance_count(&self) -> u64 {
        self.parts.iter().map(|p| p.quantity as u64).sum()
    }
}

/// Validate raw rows into typed parts
///
/// Rows carrying a `cabinet` group label get the label prefixed onto the
/// part name so panels stay attributable after several cabinets are nested
/// together.
pub fn validate_rows(rows: &[PartRow]) -> CatalogReport {
    let mut parts = Vec::new();
    let mut rejected = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        match validate_row(idx, row) {
            Ok(part) => parts.push(part),
            Err(rejection) => rejected.push(rejection),
        }
    }

    CatalogReport { parts, rejected }
}

fn validate_row(idx: usize, row: &PartRow) -> Result<Part, Rejection> {
    let reject = |detail: String| Rejection {
        name: row.name.clone(),
        width: row.width,
        height: row.height,
        count: row.quantity.max(0).min(u32::MAX as i64) as u32,
        reason: RejectReason::InvalidPartDimension(format!("row {}: {}", idx + 1, detail)),
    };

    if row.name.trim().is_empty() {
        return Err(reject("part name is required".to_string()));
    }
    if !row.width.is_finite() || row.width <= 0.0 {
        return Err(reject(format!("width must be positive (got {})", row.width)));
    }
    if !row.height.is_finite() || row.height <= 0.0 {
        return Err(reject(format!(
            "height must be positive (got {})",
            row.height
        )));
    }
    if row.quantity < 1 || row.quantity > u32::MAX as i64 {
        return Err(reject(format!(
            "quantity must be a positive integer (got {})",
            row.quantity
        )));
    }
    let edge: EdgeSpec = row
        .edge
        .parse()
        .map_err(|e: String| reject(e))?;

    let name = match &row.cabinet {
        Some(cabinet) if !cabinet.trim().is_empty() => format!("{}-{}", cabinet, row.name),
        _ => row.name.clone(),
    };

    Ok(Part {
        name,
        width: row.width,
        height: row.height,
        quantity: row.quantity as u32,
        edge,
    })
}
