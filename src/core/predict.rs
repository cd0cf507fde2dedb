//! Historical-offset predictor
//!
//! Predicts a part list for a new cabinet from prior saved jobs of the same
//! cabinet type. For every part name seen across the samples, the offset
//! between the cabinet's base dimensions and the part's dimensions is
//! collected per sample; the median offset (robust against one-off
//! measurement noise) is then subtracted from the new base dimensions.

use crate::entities::part::{EdgeSpec, Part};
use crate::history::HistoryError;

/// Minimum decodable samples required before predicting
pub const MIN_SAMPLES: usize = 3;

/// One stored sample row as the predictor consumes it
///
/// The parts snapshot is carried raw; decoding happens here so a corrupt
/// record can be skipped with a warning instead of failing the query.
#[derive(Debug, Clone)]
pub struct SampleRow {
    pub id: i64,
    pub base_width: f64,
    pub base_height: f64,
    pub parts_json: String,
}

/// History query seam
///
/// Implementations must return rows in a fixed, stable order (the SQLite
/// store orders by save time, then row id) - the predictor's tie-breaks
/// depend on it.
pub trait JobHistory {
    fn samples_for(&self, cabinet_type: &str) -> Result<Vec<SampleRow>, HistoryError>;
}

/// A stored record whose snapshot failed to decode
///
/// Recoverable: the record is skipped and the prediction proceeds on the
/// remaining samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorruptRecord {
    pub id: i64,
    pub detail: String,
}

/// Prediction result - insufficient data is a value, not an error
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionResult {
    /// Fewer than [`MIN_SAMPLES`] decodable samples matched
    Insufficient { matching: usize },

    /// Predicted part list, one part per distinct name seen
    Predicted { parts: Vec<Part> },
}

/// Prediction plus any corrupt-record warnings encountered on the way
#[derive(Debug, Clone, PartialEq)]
pub struct PredictOutcome {
    pub result: PredictionResult,
    pub warnings: Vec<CorruptRecord>,
}

/// Per-part accumulation across samples, in first-encountered order
struct PartStats {
    name: String,
    offsets_w: Vec<f64>,
    offsets_h: Vec<f64>,
    quantities: Vec<f64>,
    edges: Vec<EdgeSpec>,
}

/// Predict a part list for a new cabinet of the given type and base size
pub fn predict(
    history: &impl JobHistory,
    cabinet_type: &str,
    new_base_width: f64,
    new_base_height: f64,
) -> Result<PredictOutcome, HistoryError> {
    let rows = history.samples_for(cabinet_type)?;

    let mut warnings = Vec::new();
    let mut samples: Vec<(f64, f64, Vec<Part>)> = Vec::new();
    for row in rows {
        match serde_json::from_str::<Vec<Part>>(&row.parts_json) {
            Ok(parts) => samples.push((row.base_width, row.base_height, parts)),
            Err(err) => warnings.push(CorruptRecord {
                id: row.id,
                detail: err.to_string(),
            }),
        }
    }

    if samples.len() < MIN_SAMPLES {
        return Ok(PredictOutcome {
            result: PredictionResult::Insufficient {
                matching: samples.len(),
            },
            warnings,
        });
    }

    // Group by part name, preserving first-encountered order over the fixed
    // sample order.
    let mut stats: Vec<PartStats> = Vec::new();
    for (base_w, base_h, parts) in &samples {
        for part in parts {
            let idx = match stats.iter().position(|s| s.name == part.name) {
                Some(idx) => idx,
                None => {
                    stats.push(PartStats {
                        name: part.name.clone(),
                        offsets_w: Vec::new(),
                        offsets_h: Vec::new(),
                        quantities: Vec::new(),
                        edges: Vec::new(),
                    });
                    stats.len() - 1
                }
            };
            let entry = &mut stats[idx];
            entry.offsets_w.push(base_w - part.width);
            entry.offsets_h.push(base_h - part.height);
            entry.quantities.push(part.quantity as f64);
            entry.edges.push(part.edge);
        }
    }

    let parts = stats
        .into_iter()
        .map(|mut s| Part {
            name: s.name,
            width: new_base_width - median(&mut s.offsets_w),
            height: new_base_height - median(&mut s.offsets_h),
            quantity: median(&mut s.quantities).round() as u32,
            edge: mode(&s.edges),
        })
        .collect();

    Ok(PredictOutcome {
        result: PredictionResult::Predicted { parts },
        warnings,
    })
}

/// Median of a non-empty slice; even counts average the middle pair
fn median(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}

/// Most frequent edge spec; ties keep the first-encountered value
///
/// Deliberately not a hash-map count - the tie-break must be stable over
/// the fixed sample order.
fn mode(edges: &[EdgeSpec]) -> EdgeSpec {
    let mut counts: Vec<(EdgeSpec, usize)> = Vec::new();
    for edge in edges {
        match counts.iter_mut().find(|(e, _)| e == edge) {
            Some((_, n)) => *n += 1,
            None => counts.push((*edge, 1)),
        }
    }
    // max_by_key would return the last maximum on ties; scan with a strict
    // greater-than so the first-encountered spec wins instead.
    let mut best: Option<(EdgeSpec, usize)> = None;
    for (edge, n) in counts {
        if best.map_or(true, |(_, best_n)| n > best_n) {
            best = Some((edge, n));
        }
    }
    best.map(|(e, _)| e).unwrap_or_default()
}
