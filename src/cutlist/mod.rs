//! Cut-list file format
//!
//! A cut list is a small YAML document: an optional sheet override plus the
//! part rows. Numeric fields default rather than hard-fail at parse time so
//! a bad row surfaces as a per-row catalog rejection instead of killing the
//! whole file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::part::Part;

#[derive(Debug, Error)]
pub enum CutListError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yml::Error,
    },
}

/// Optional per-file sheet override
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SheetSpec {
    pub width: f64,
    pub height: f64,
}

/// One raw cut-list row, not yet validated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartRow {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub width: f64,

    #[serde(default)]
    pub height: f64,

    #[serde(default = "default_quantity")]
    pub quantity: i64,

    #[serde(default = "default_edge")]
    pub edge: String,

    /// Optional cabinet group label, prefixed onto the part name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cabinet: Option<String>,
}

fn default_quantity() -> i64 {
    1
}

fn default_edge() -> String {
    "none".to_string()
}

/// A parsed cut-list file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutList {
    /// Sheet override; absent means the configured default sheet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<SheetSpec>,

    #[serde(default)]
    pub parts: Vec<PartRow>,
}

impl CutList {
    /// Build a cut list from typed parts (prediction output, template export)
    pub fn from_parts(parts: &[Part]) -> Self {
        Self {
            sheet: None,
            parts: parts
                .iter()
                .map(|p| PartRow {
                    name: p.name.clone(),
                    width: p.width,
                    height: p.height,
                    quantity: p.quantity as i64,
                    edge: p.edge.to_string(),
                    cabinet: None,
                })
                .collect(),
        }
    }

    pub fn to_yaml(&self) -> Result<String, serde_yml::Error> {
        serde_yml::to_string(self)
    }
}

/// Parse cut-list YAML content
pub fn parse(content: &str, filename: &str) -> Result<CutList, CutListError> {
    serde_yml::from_str(content).map_err(|source| CutListError::Yaml {
        path: filename.to_string(),
        source,
    })
}

/// Load a cut-list file from disk
pub fn load(path: &Path) -> Result<CutList, CutListError> {
    let content = std::fs::read_to_string(path).map_err(|source| CutListError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse(&content, &path.display().to_string())
}
