pub mod axis;
pub mod transform;

pub use axis::{AxisConfig, AxisKind};
pub use transform::{Calibration, CalibrationPoint};
