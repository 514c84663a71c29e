//! Flat re-exports of the items most callers need.

pub use crate::calibrate::{AxisConfig, AxisKind, Calibration, CalibrationPoint};
pub use crate::edit::{DragGesture, EditSession};
pub use crate::extract::{CurveExtractor, ImageFrame, TargetColor};
pub use crate::filter::OutlierFilter;
pub use crate::records::{Dataset, ImageRecord, MemoryStore, RecordStore, SourceType};
pub use crate::{CoreError, CoreResult, DataPoint, PipelineConfig, PixelPoint};
