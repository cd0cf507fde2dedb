//! Placement types - stock sheets and the rectangles nested onto them

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entities::part::EdgeSpec;

/// A fixed-size stock board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Width in mm
    pub width: f64,

    /// Height in mm
    pub height: f64,
}

impl Sheet {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Board area in mm²
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A physical side of a placed panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Top => write!(f, "top"),
            Side::Bottom => write!(f, "bottom"),
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// One panel nested onto a sheet
///
/// Coordinates are the top-left origin of the panel on the sheet. Reported
/// dimensions are the true panel size after rotation; the kerf spacing the
/// packer reserved around the panel is already stripped back out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedRect {
    pub x: f64,
    pub y: f64,

    /// Panel width as cut (post-rotation), mm
    pub width: f64,

    /// Panel height as cut (post-rotation), mm
    pub height: f64,

    /// Whether the panel was rotated 90° from its declared orientation
    pub rotated: bool,

    /// Name of the originating part
    pub name: String,

    /// Edge-banding requirement of the originating part
    pub edge: EdgeSpec,

    /// Physical sides to band, filled by the edge-band resolver
    #[serde(default)]
    pub banded: BTreeSet<Side>,
}

impl PlacedRect {
    /// Panel area in mm²
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// All panels nested onto one consumed sheet
///
/// Layouts are produced in the order bins are opened; the first layout is
/// the first one filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetLayout {
    /// The stock sheet these placements sit on
    pub sheet: Sheet,

    /// Placements in the order they were made
    pub placed: Vec<PlacedRect>,
}

impl SheetLayout {
    pub fn new(sheet: Sheet) -> Self {
        Self {
            sheet,
            placed: Vec::new(),
        }
    }

    /// Sum of placed panel areas, mm²
    pub fn placed_area(&self) -> f64 {
        self.placed.iter().map(PlacedRect::area).sum()
    }
}
