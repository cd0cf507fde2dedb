//! Shelf-packing engine
//!
//! Nests part rectangles onto fixed-size stock sheets with a deterministic
//! column heuristic: each bin is filled column by column, each column top to
//! bottom. The instance ordering (height desc, width desc, then input order)
//! is part of the engine's contract - identical inputs always reproduce the
//! same layouts.

use serde::Serialize;
use thiserror::Error;

use crate::entities::layout::{PlacedRect, Sheet, SheetLayout};
use crate::entities::part::{EdgeSpec, Part};

/// Hard ceiling on expanded rectangle instances per pack call
///
/// A single row with a runaway quantity must fail fast instead of expanding
/// into unbounded work.
pub const MAX_INSTANCES: usize = 5_000;

/// Float comparison slop for cursor arithmetic, mm
const EPS: f64 = 1e-9;

/// Why a part (or some of its instances) could not be placed
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum RejectReason {
    /// The part failed validation before packing
    #[error("invalid part dimensions: {0}")]
    InvalidPartDimension(String),

    /// No permitted orientation fits an empty sheet
    #[error("part exceeds the sheet in every allowed orientation")]
    PartTooLargeForSheet,

    /// Bin or instance budget exhausted before this instance could be placed
    #[error("sheet capacity exceeded")]
    CapacityExceeded,
}

/// A per-part rejection report
///
/// Every unplaced quantity instance is attributed to its source part and a
/// reason; nothing is silently dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub name: String,
    pub width: f64,
    pub height: f64,

    /// How many quantity instances this rejection covers
    pub count: u32,

    pub reason: RejectReason,
}

/// Packing parameters for one run
#[derive(Debug, Clone)]
pub struct PackSettings {
    pub sheet: Sheet,

    /// Saw blade width reserved around every panel, mm
    pub kerf: f64,

    /// Whether instances may be rotated 90°
    pub rotation_allowed: bool,

    /// Maximum number of stock sheets to consume
    pub max_bins: usize,

    /// Expanded instance ceiling, see [`MAX_INSTANCES`]
    pub max_instances: usize,
}

impl PackSettings {
    pub fn new(sheet: Sheet) -> Self {
        Self {
            sheet,
            kerf: 0.0,
            rotation_allowed: true,
            max_bins: 100,
            max_instances: MAX_INSTANCES,
        }
    }

    pub fn with_kerf(mut self, kerf: f64) -> Self {
        self.kerf = kerf;
        self
    }

    pub fn with_rotation(mut self, allowed: bool) -> Self {
        self.rotation_allowed = allowed;
        self
    }

    pub fn with_max_bins(mut self, max_bins: usize) -> Self {
        self.max_bins = max_bins;
        self
    }
}

/// Outcome of one pack run: consumed sheet layouts plus structured rejections
///
/// Partial success is the norm - valid parts pack even when others are
/// rejected.
#[derive(Debug, Clone, Serialize)]
pub struct PackResult {
    pub layouts: Vec<SheetLayout>,
    pub rejections: Vec<Rejection>,
}

impl PackResult {
    /// Number of stock sheets consumed
    pub fn bins_used(&self) -> usize {
        self.layouts.len()
    }

    /// Sum of successfully placed panel area, mm²
    pub fn placed_area(&self) -> f64 {
        self.layouts.iter().map(SheetLayout::placed_area).sum()
    }

    /// Placed area over consumed board area, 0..=1
    pub fn utilization(&self) -> f64 {
        if self.layouts.is_empty() {
            return 0.0;
        }
        let board_area: f64 = self.layouts.iter().map(|l| l.sheet.area()).sum();
        self.placed_area() / board_area
    }

    /// Number of panels placed across all layouts
    pub fn placed_count(&self) -> usize {
        self.layouts.iter().map(|l| l.placed.len()).sum()
    }

    /// True when every quantity instance of every part was placed
    pub fn is_complete(&self) -> bool {
        self.rejections.is_empty()
    }
}

/// One expanded rectangle instance awaiting placement
#[derive(Debug, Clone)]
struct Instance {
    name: String,
    width: f64,
    height: f64,
    edge: EdgeSpec,
}

/// Column cursor state within the currently open bin
#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    col_x: f64,
    row_y: f64,
    /// Widest footprint placed in the active column so far
    col_width: f64,
}

/// Nest `parts` onto sheets of `settings.sheet`
///
/// Invalid parts are rejected individually and do not abort the call.
/// Cursor state is constructed fresh per call; the engine retains nothing
/// between invocations.
pub fn pack(parts: &[Part], settings: &PackSettings) -> PackResult {
    let mut rejections: Vec<Rejection> = Vec::new();

    let valid: Vec<&Part> = parts
        .iter()
        .filter(|part| match validate_part(part) {
            Ok(()) => true,
            Err(detail) => {
                push_rejection(
                    &mut rejections,
                    &part.name,
                    part.width,
                    part.height,
                    part.quantity.max(1),
                    RejectReason::InvalidPartDimension(detail),
                );
                false
            }
        })
        .collect();

    // Fail fast on pathological quantities before expanding anything.
    let instance_total: u64 = valid.iter().map(|p| p.quantity as u64).sum();
    if instance_total > settings.max_instances as u64 {
        for part in &valid {
            push_rejection(
                &mut rejections,
                &part.name,
                part.width,
                part.height,
                part.quantity,
                RejectReason::CapacityExceeded,
            );
        }
        return PackResult {
            layouts: Vec::new(),
            rejections,
        };
    }

    let mut instances: Vec<Instance> = Vec::with_capacity(instance_total as usize);
    for part in &valid {
        for _ in 0..part.quantity {
            instances.push(Instance {
                name: part.name.clone(),
                width: part.width,
                height: part.height,
                edge: part.edge,
            });
        }
    }

    // Height desc, width desc; the stdlib sort is stable so ties keep input
    // order. This ordering is a documented contract.
    instances.sort_by(|a, b| {
        b.height
            .total_cmp(&a.height)
            .then(b.width.total_cmp(&a.width))
    });

    let sheet = settings.sheet;
    let kerf = settings.kerf;
    let mut layouts: Vec<SheetLayout> = Vec::new();
    let mut cur = Cursor::default();

    for inst in instances {
        let default_fp = (inst.width + kerf, inst.height + kerf);
        let rotated_fp = (inst.height + kerf, inst.width + kerf);

        let default_fits = fits_sheet(default_fp, &sheet);
        let rotated_fits = settings.rotation_allowed && fits_sheet(rotated_fp, &sheet);

        if !default_fits && !rotated_fits {
            push_rejection(
                &mut rejections,
                &inst.name,
                inst.width,
                inst.height,
                1,
                RejectReason::PartTooLargeForSheet,
            );
            continue;
        }

        let (fw, fh, rotated) = if default_fits && rotated_fits {
            choose_orientation(default_fp, rotated_fp, &sheet, &cur)
        } else if default_fits {
            (default_fp.0, default_fp.1, false)
        } else {
            (rotated_fp.0, rotated_fp.1, true)
        };

        // Column is full: advance to a fresh column in this bin.
        if cur.row_y + fh > sheet.height + EPS {
            cur.col_x += cur.col_width;
            cur.row_y = 0.0;
            cur.col_width = 0.0;
        }

        // Bin is full (or none open yet): open the next one if the budget
        // allows, otherwise this instance is unplaceable.
        if layouts.is_empty() || cur.col_x + fw > sheet.width + EPS {
            if layouts.len() >= settings.max_bins {
                push_rejection(
                    &mut rejections,
                    &inst.name,
                    inst.width,
                    inst.height,
                    1,
                    RejectReason::CapacityExceeded,
                );
                continue;
            }
            layouts.push(SheetLayout::new(sheet));
            cur = Cursor::default();
        }

        let layout = layouts
            .last_mut()
            .unwrap_or_else(|| unreachable!("a bin is always open at placement time"));
        layout.placed.push(PlacedRect {
            x: cur.col_x,
            y: cur.row_y,
            width: fw - kerf,
            height: fh - kerf,
            rotated,
            name: inst.name,
            edge: inst.edge,
            banded: Default::default(),
        });

        cur.row_y += fh;
        if fw > cur.col_width {
            cur.col_width = fw;
        }
    }

    PackResult {
        layouts,
        rejections,
    }
}

fn validate_part(part: &Part) -> Result<(), String> {
    if part.name.trim().is_empty() {
        return Err("part name is required".to_string());
    }
    if !part.width.is_finite() || part.width <= 0.0 {
        return Err(format!("width must be positive (got {})", part.width));
    }
    if !part.height.is_finite() || part.height <= 0.0 {
        return Err(format!("height must be positive (got {})", part.height));
    }
    if part.quantity == 0 {
        return Err("quantity must be at least 1".to_string());
    }
    Ok(())
}

fn fits_sheet(footprint: (f64, f64), sheet: &Sheet) -> bool {
    footprint.0 <= sheet.width + EPS && footprint.1 <= sheet.height + EPS
}

/// Pick the orientation for an instance whose both orientations fit a sheet
///
/// The default orientation is tried first; the rotated one is taken only
/// when it still fits vertically at the current cursor and strictly reduces
/// the leftover horizontal slack against the remaining bin width. Equal
/// slack keeps the default.
fn choose_orientation(
    default_fp: (f64, f64),
    rotated_fp: (f64, f64),
    sheet: &Sheet,
    cur: &Cursor,
) -> (f64, f64, bool) {
    let rem_w = sheet.width - cur.col_x;

    let default_slack = if default_fp.0 <= rem_w + EPS {
        rem_w - default_fp.0
    } else {
        f64::INFINITY
    };
    let rotated_slack = if rotated_fp.0 <= rem_w + EPS {
        rem_w - rotated_fp.0
    } else {
        f64::INFINITY
    };

    let rotated_fits_column = cur.row_y + rotated_fp.1 <= sheet.height + EPS;
    if rotated_fits_column && rotated_slack + EPS < default_slack {
        (rotated_fp.0, rotated_fp.1, true)
    } else {
        (default_fp.0, default_fp.1, false)
    }
}

fn push_rejection(
    rejections: &mut Vec<Rejection>,
    name: &str,
    width: f64,
    height: f64,
    count: u32,
    reason: RejectReason,
) {
    if let Some(existing) = rejections
        .iter_mut()
        .find(|r| r.name == name && r.width == width && r.height == height && r.reason == reason)
    {
        existing.count += count;
    } else {
        rejections.push(Rejection {
            name: name.to_string(),
            width,
            height,
            count,
            reason,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> Sheet {
        Sheet::new(2440.0, 1220.0)
    }

    #[test]
    fn test_two_panels_fit_one_bin() {
        let parts = vec![Part::new("Panel", 1000.0, 500.0, 2)];
        let settings = PackSettings::new(sheet()).with_kerf(3.0).with_rotation(false);
        let result = pack(&parts, &settings);

        assert!(result.is_complete());
        assert_eq!(result.bins_used(), 1);
        assert_eq!(result.placed_count(), 2);
        let expected = (1000.0 * 500.0 * 2.0) / (2440.0 * 1220.0);
        assert!((result.utilization() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_reported_dims_exclude_kerf() {
        let parts = vec![Part::new("Panel", 1000.0, 500.0, 1)];
        let settings = PackSettings::new(sheet()).with_kerf(3.0);
        let result = pack(&parts, &settings);

        let rect = &result.layouts[0].placed[0];
        assert!((rect.width - 1000.0).abs() < 1e-9);
        assert!((rect.height - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_part_too_large_without_rotation() {
        let parts = vec![Part::new("Rail", 3000.0, 100.0, 1)];
        let settings = PackSettings::new(sheet()).with_rotation(false);
        let result = pack(&parts, &settings);

        assert!(result.layouts.is_empty());
        assert_eq!(result.rejections.len(), 1);
        assert_eq!(result.rejections[0].reason, RejectReason::PartTooLargeForSheet);
    }

    #[test]
    fn test_rotation_rescues_long_part() {
        // 3000x100 is too wide as declared but fits rotated (100x3000? no -
        // 3000 exceeds both sheet axes). Use 2000x100: rotated it is
        // 100x2000, which exceeds sheet height; as declared it fits.
        let parts = vec![Part::new("Rail", 2000.0, 100.0, 1)];
        let settings = PackSettings::new(sheet()).with_rotation(true);
        let result = pack(&parts, &settings);
        assert!(result.is_complete());
    }

    #[test]
    fn test_part_too_large_even_with_rotation() {
        let parts = vec![Part::new("Slab", 3000.0, 1300.0, 1)];
        let settings = PackSettings::new(sheet()).with_rotation(true);
        let result = pack(&parts, &settings);

        assert_eq!(result.rejections.len(), 1);
        assert_eq!(result.rejections[0].reason, RejectReason::PartTooLargeForSheet);
    }

    #[test]
    fn test_invalid_parts_rejected_individually() {
        let parts = vec![
            Part::new("Good", 400.0, 300.0, 1),
            Part::new("Flat", 0.0, 300.0, 1),
            Part::new("Phantom", 400.0, 300.0, 0),
            Part::new("", 400.0, 300.0, 1),
        ];
        let result = pack(&parts, &PackSettings::new(sheet()));

        assert_eq!(result.placed_count(), 1);
        assert_eq!(result.rejections.len(), 3);
        assert!(result
            .rejections
            .iter()
            .all(|r| matches!(r.reason, RejectReason::InvalidPartDimension(_))));
    }

    #[test]
    fn test_no_rotation_when_disallowed() {
        let parts = vec![
            Part::new("A", 600.0, 400.0, 6),
            Part::new("B", 200.0, 900.0, 4),
        ];
        let settings = PackSettings::new(sheet()).with_kerf(3.0).with_rotation(false);
        let result = pack(&parts, &settings);

        assert!(result
            .layouts
            .iter()
            .flat_map(|l| &l.placed)
            .all(|r| !r.rotated));
    }

    #[test]
    fn test_determinism() {
        let parts = vec![
            Part::new("Side", 550.0, 800.0, 4),
            Part::new("Shelf", 530.0, 760.0, 6),
            Part::new("Back", 800.0, 1100.0, 2),
            Part::new("Strip", 80.0, 800.0, 10),
        ];
        let settings = PackSettings::new(sheet()).with_kerf(3.0);
        let a = pack(&parts, &settings);
        let b = pack(&parts, &settings);

        assert_eq!(a.layouts, b.layouts);
        assert_eq!(a.rejections, b.rejections);
    }

    #[test]
    fn test_area_conservation() {
        let parts = vec![
            Part::new("Side", 550.0, 800.0, 4),
            Part::new("Shelf", 530.0, 760.0, 6),
            Part::new("Door", 400.0, 700.0, 2),
        ];
        let settings = PackSettings::new(sheet()).with_kerf(3.0);
        let result = pack(&parts, &settings);

        assert!(result.is_complete());
        let input_area: f64 = parts.iter().map(Part::total_area).sum();
        assert!((result.placed_area() - input_area).abs() < 1e-6);
    }

    #[test]
    fn test_footprints_do_not_overlap_and_stay_inside() {
        let parts = vec![
            Part::new("A", 700.0, 500.0, 5),
            Part::new("B", 300.0, 900.0, 4),
            Part::new("C", 150.0, 150.0, 20),
        ];
        let kerf = 4.0;
        let settings = PackSettings::new(sheet()).with_kerf(kerf);
        let result = pack(&parts, &settings);
        assert!(result.is_complete());

        for layout in &result.layouts {
            let rects = &layout.placed;
            for r in rects {
                assert!(r.x >= -1e-9 && r.y >= -1e-9);
                assert!(r.x + r.width + kerf <= layout.sheet.width + 1e-9);
                assert!(r.y + r.height + kerf <= layout.sheet.height + 1e-9);
            }
            for (i, a) in rects.iter().enumerate() {
                for b in rects.iter().skip(i + 1) {
                    let disjoint = a.x + a.width + kerf <= b.x + 1e-9
                        || b.x + b.width + kerf <= a.x + 1e-9
                        || a.y + a.height + kerf <= b.y + 1e-9
                        || b.y + b.height + kerf <= a.y + 1e-9;
                    assert!(disjoint, "footprints overlap: {:?} vs {:?}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_max_bins_exhaustion_reports_capacity() {
        let parts = vec![Part::new("Big", 2400.0, 1200.0, 3)];
        let settings = PackSettings::new(sheet()).with_max_bins(2);
        let result = pack(&parts, &settings);

        assert_eq!(result.bins_used(), 2);
        assert_eq!(result.rejections.len(), 1);
        assert_eq!(result.rejections[0].reason, RejectReason::CapacityExceeded);
        assert_eq!(result.rejections[0].count, 1);
    }

    #[test]
    fn test_instance_ceiling_fails_fast() {
        let parts = vec![
            Part::new("Runaway", 100.0, 100.0, 1_000_000),
            Part::new("Normal", 400.0, 300.0, 2),
        ];
        let result = pack(&parts, &PackSettings::new(sheet()));

        assert!(result.layouts.is_empty());
        assert!(result
            .rejections
            .iter()
            .all(|r| r.reason == RejectReason::CapacityExceeded));
        assert_eq!(result.rejections.len(), 2);
    }

    #[test]
    fn test_sort_contract_tallest_first() {
        let parts = vec![
            Part::new("Short", 500.0, 200.0, 1),
            Part::new("Tall", 500.0, 1100.0, 1),
        ];
        let settings = PackSettings::new(sheet()).with_rotation(false);
        let result = pack(&parts, &settings);

        let first = &result.layouts[0].placed[0];
        assert_eq!(first.name, "Tall");
        assert_eq!((first.x, first.y), (0.0, 0.0));
    }

    #[test]
    fn test_column_wrap_advances_by_widest() {
        // Two 800-tall panels fill a column (1220 sheet height fits one
        // 800 plus nothing), so the second starts a new column offset by the
        // first column's width.
        let parts = vec![Part::new("Side", 550.0, 800.0, 2)];
        let settings = PackSettings::new(sheet()).with_rotation(false);
        let result = pack(&parts, &settings);

        let placed = &result.layouts[0].placed;
        assert_eq!(placed[0].x, 0.0);
        assert_eq!(placed[1].x, 550.0);
        assert_eq!(placed[1].y, 0.0);
    }
}
