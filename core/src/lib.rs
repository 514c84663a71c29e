//! Calibration and curve-extraction core for the chart digitizer.
//!
//! The modules cover the full image-to-dataset pipeline: pixel/data
//! coordinate calibration, color-based column scanning, rolling-window
//! outlier suppression, and the editable point session with bounded undo.
//! Everything here is synchronous and I/O-free; decoding, persistence,
//! and transport live in the driver crate.

pub mod calibrate;
pub mod edit;
pub mod extract;
pub mod filter;
pub mod math;
pub mod prelude;
pub mod records;
pub mod telemetry;

use serde::{Deserialize, Serialize};

/// A location in image space (pixel rows/columns, upright orientation).
///
/// Coordinates are `f64` because per-column aggregation produces
/// fractional rows (median of an even match count).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single sample in data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpolated: Option<bool>,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            interpolated: None,
        }
    }
}

/// Shared tuning knobs for the extraction/filter pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum RGB Euclidean distance for a pixel to match the target color.
    pub tolerance: f64,
    /// Column stride during extraction; 1 scans every column.
    pub sample_step: usize,
    /// Rolling window width for the outlier filter.
    pub outlier_window: usize,
    /// Deviation threshold in units of the window sigma.
    pub sigma_limit: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tolerance: 30.0,
            sample_step: 1,
            outlier_window: 11,
            sigma_limit: 3.0,
        }
    }
}

/// Common error type for the core pipeline.
#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("invalid color: {0}")]
    InvalidColor(String),
    #[error("invalid calibration: {0}")]
    InvalidCalibration(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
