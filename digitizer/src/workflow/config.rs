use anyhow::Context;
use curvecore::calibrate::{AxisKind, Calibration, CalibrationPoint};
use curvecore::{DataPoint, PipelineConfig, PixelPoint};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One pixel/data correspondence as written in a job file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalibrationEntry {
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub data_x: f64,
    pub data_y: f64,
}

fn default_axis() -> AxisKind {
    AxisKind::Linear
}

/// Declarative extraction job: target color, calibration points, and
/// optional pipeline overrides merged over the built-in defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JobConfig {
    /// Source image path; omitted for synthetic runs.
    #[serde(default)]
    pub image: Option<String>,
    /// Target curve color as #RRGGBB.
    pub color: String,
    #[serde(default)]
    pub tolerance: Option<f64>,
    #[serde(default)]
    pub sample_step: Option<usize>,
    #[serde(default)]
    pub outlier_window: Option<usize>,
    #[serde(default)]
    pub sigma_limit: Option<f64>,
    #[serde(default = "default_axis")]
    pub x_axis: AxisKind,
    #[serde(default = "default_axis")]
    pub y_axis: AxisKind,
    #[serde(default)]
    pub calibration: Vec<CalibrationEntry>,
    /// Sort the final sequence by data x before export.
    #[serde(default)]
    pub sort_ascending: Option<bool>,
}

impl JobConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading job config {}", path_ref.display()))?;
        let config: JobConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing job config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(color: &str, tolerance: f64, sample_step: usize) -> Self {
        Self {
            image: None,
            color: color.to_string(),
            tolerance: Some(tolerance),
            sample_step: Some(sample_step),
            outlier_window: None,
            sigma_limit: None,
            x_axis: AxisKind::Linear,
            y_axis: AxisKind::Linear,
            calibration: Vec::new(),
            sort_ascending: None,
        }
    }

    /// Effective pipeline config: explicit overrides win, everything
    /// else falls back to [`PipelineConfig::default`].
    pub fn effective_pipeline(&self) -> PipelineConfig {
        let base = PipelineConfig::default();
        PipelineConfig {
            tolerance: self.tolerance.unwrap_or(base.tolerance),
            sample_step: self.sample_step.unwrap_or(base.sample_step),
            outlier_window: self.outlier_window.unwrap_or(base.outlier_window),
            sigma_limit: self.sigma_limit.unwrap_or(base.sigma_limit),
        }
    }

    pub fn to_calibration(&self) -> anyhow::Result<Calibration> {
        let points = self
            .calibration
            .iter()
            .map(|entry| {
                CalibrationPoint::new(
                    PixelPoint::new(entry.pixel_x, entry.pixel_y),
                    DataPoint::new(entry.data_x, entry.data_y),
                )
            })
            .collect();
        Calibration::try_new(points, self.x_axis, self.y_axis)
            .context("building calibration from job config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn overrides_merge_over_defaults() {
        let mut config = JobConfig::from_args("#336699", 12.0, 2);
        config.outlier_window = None;
        let pipeline = config.effective_pipeline();
        assert_eq!(pipeline.tolerance, 12.0);
        assert_eq!(pipeline.sample_step, 2);
        assert_eq!(pipeline.outlier_window, 11);
        assert_eq!(pipeline.sigma_limit, 3.0);
    }

    #[test]
    fn load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"color: \"#0000ff\"\n\
              tolerance: 25\n\
              y_axis: log\n\
              calibration:\n\
                - { pixel_x: 0, pixel_y: 200, data_x: 0, data_y: 1 }\n\
                - { pixel_x: 400, pixel_y: 0, data_x: 10, data_y: 100 }\n",
        )
        .unwrap();
        let path = temp.into_temp_path();

        let config = JobConfig::load(&path).unwrap();
        assert_eq!(config.tolerance, Some(25.0));
        assert_eq!(config.y_axis, AxisKind::Log);
        assert_eq!(config.x_axis, AxisKind::Linear);

        let cal = config.to_calibration().unwrap();
        assert_eq!(cal.y_axis.min, 1.0);
        assert_eq!(cal.y_axis.max, 100.0);
    }

    #[test]
    fn empty_calibration_is_refused() {
        let config = JobConfig::from_args("#0000ff", 30.0, 1);
        let err = config.to_calibration().unwrap_err();
        assert!(format!("{err:#}").contains("insufficient calibration points"));
    }
}
