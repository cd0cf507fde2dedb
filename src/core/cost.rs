//! Material cost estimation
//!
//! Pure arithmetic over the pack result: board cost scales with consumed
//! sheets, skin (veneer) cost with successfully placed panel area.

use serde::Serialize;
use thiserror::Error;

/// Square millimeters per square meter
pub const MM2_PER_M2: f64 = 1_000_000.0;

/// A cost estimate breakdown, in the caller's currency unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub board_cost: f64,
    pub skin_cost: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostError {
    #[error("{name} must not be negative (got {value})")]
    NegativeInput { name: &'static str, value: f64 },
}

/// Estimate material cost for a pack run
pub fn estimate(
    bins_used: usize,
    price_per_sheet: f64,
    placed_area_mm2: f64,
    skin_cost_per_m2: f64,
) -> Result<CostBreakdown, CostError> {
    for (name, value) in [
        ("price_per_sheet", price_per_sheet),
        ("placed_area_mm2", placed_area_mm2),
        ("skin_cost_per_m2", skin_cost_per_m2),
    ] {
        if !(value >= 0.0) {
            return Err(CostError::NegativeInput { name, value });
        }
    }

    let board_cost = bins_used as f64 * price_per_sheet;
    let skin_cost = (placed_area_mm2 / MM2_PER_M2) * skin_cost_per_m2;
    Ok(CostBreakdown {
        board_cost,
        skin_cost,
        total: board_cost + skin_cost,
    })
}
