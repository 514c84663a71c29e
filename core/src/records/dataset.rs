use crate::calibrate::Calibration;
use crate::DataPoint;
use serde::{Deserialize, Serialize};

/// How a dataset's points came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Extracted,
    Imported,
    Manual,
}

/// Finished dataset handed to the storage/export collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub id: String,
    pub name: String,
    /// Display color as a hex string.
    pub color: String,
    pub points: Vec<DataPoint>,
    pub source_type: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_image_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration: Option<Calibration>,
    /// Unix epoch milliseconds.
    pub created_at: u64,
    pub updated_at: u64,
}

/// Stored source image: raw RGBA bytes plus dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: String,
    pub name: String,
    pub bytes: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub created_at: u64,
}
