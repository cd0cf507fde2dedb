//! Part entity type - a required panel cut

use serde::{Deserialize, Serialize};

/// Which logical edges of a panel receive edge-banding
///
/// "Long" and "short" refer to the panel as cut, not as declared: the
/// resolver maps these onto physical sides after placement and rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum EdgeSpec {
    /// No banding
    #[default]
    None,
    /// One long edge
    Long1,
    /// Both long edges
    Long2,
    /// One short edge
    Short1,
    /// Both short edges
    Short2,
    /// All four edges
    Full,
}

impl EdgeSpec {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeSpec::None => "none",
            EdgeSpec::Long1 => "long1",
            EdgeSpec::Long2 => "long2",
            EdgeSpec::Short1 => "short1",
            EdgeSpec::Short2 => "short2",
            EdgeSpec::Full => "full",
        }
    }
}

impl std::fmt::Display for EdgeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EdgeSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(EdgeSpec::None),
            "long1" => Ok(EdgeSpec::Long1),
            "long2" => Ok(EdgeSpec::Long2),
            "short1" => Ok(EdgeSpec::Short1),
            "short2" => Ok(EdgeSpec::Short2),
            "full" => Ok(EdgeSpec::Full),
            _ => Err(format!(
                "Invalid edge spec: {}. Use none, long1, long2, short1, short2, or full",
                s
            )),
        }
    }
}

/// A required panel cut
///
/// Dimensions are millimeters. A part is immutable once handed to the
/// packer; quantity is expanded into individual instances there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Display name (not required to be unique)
    pub name: String,

    /// Width in mm, must be > 0
    pub width: f64,

    /// Height in mm, must be > 0
    pub height: f64,

    /// Number of identical panels to cut, must be > 0
    pub quantity: u32,

    /// Edge-banding requirement
    #[serde(default)]
    pub edge: EdgeSpec,
}

impl Part {
    pub fn new(name: impl Into<String>, width: f64, height: f64, quantity: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            quantity,
            edge: EdgeSpec::None,
        }
    }

    pub fn with_edge(mut self, edge: EdgeSpec) -> Self {
        self.edge = edge;
        self
    }

    /// Total panel area over all quantity instances, mm²
    pub fn total_area(&self) -> f64 {
        self.width * self.height * self.quantity as f64
    }

    /// Compare against another part within a dimensional tolerance (mm)
    ///
    /// Used by snapshot round-trip checks where exact float identity is not
    /// the contract.
    pub fn approx_eq(&self, other: &Part, tol: f64) -> bool {
        self.name == other.name
            && self.quantity == other.quantity
            && self.edge == other.edge
            && (self.width - other.width).abs() < tol
            && (self.height - other.height).abs() < tol
    }
}
