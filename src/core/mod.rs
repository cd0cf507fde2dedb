//! Core module - the algorithmic heart of the toolkit

pub mod catalog;
pub mod config;
pub mod cost;
pub mod edgeband;
pub mod packing;
pub mod predict;

pub use catalog::{validate_rows, CatalogReport};
pub use config::Config;
pub use cost::{estimate, CostBreakdown, CostError};
pub use edgeband::{apply_banding, resolve};
pub use packing::{pack, PackResult, PackSettings, RejectReason, Rejection, MAX_INSTANCES};
pub use predict::{
    predict, CorruptRecord, JobHistory, PredictOutcome, PredictionResult, SampleRow, MIN_SAMPLES,
};
