use serde::{Deserialize, Serialize};

/// Axis scale type; the two axes of a calibration never interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    Linear,
    Log,
}

/// Effective display/export range for one axis.
///
/// Derived from the calibration data-space extremes but independently
/// editable afterward. `min > max` is a valid inverted axis; consumers
/// that need ordered bounds go through [`AxisConfig::ordered_bounds`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub kind: AxisKind,
    pub min: f64,
    pub max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl AxisConfig {
    pub fn new(kind: AxisKind, min: f64, max: f64) -> Self {
        Self {
            kind,
            min,
            max,
            label: None,
            unit: None,
        }
    }

    /// Bounds normalized so the smaller value is first.
    pub fn ordered_bounds(&self) -> (f64, f64) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }

    /// Clamps a value into the axis range regardless of axis inversion.
    pub fn clamp(&self, value: f64) -> f64 {
        let (lo, hi) = self.ordered_bounds();
        value.max(lo).min(hi)
    }
}
