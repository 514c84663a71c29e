use curvecore::DataPoint;
use serde::{Deserialize, Serialize};

/// Snapshot of the last pipeline pass, served to rendering collaborators.
/// Consumers read this model; all mutation goes through the edit session
/// inside the runner, never through the bridge.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DigitizeModel {
    pub points: Vec<DataPoint>,
    pub raw_count: usize,
    pub kept_count: usize,
    pub notes: Vec<String>,
}
