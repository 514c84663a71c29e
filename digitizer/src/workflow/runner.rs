use crate::workflow::config::JobConfig;
use anyhow::Context;
use curvecore::prelude::{
    Calibration, CurveExtractor, DataPoint, Dataset, EditSession, ImageFrame, OutlierFilter,
    SourceType, TargetColor,
};
use curvecore::telemetry::MetricsRecorder;
use std::sync::Arc;

/// Everything one pipeline pass produced.
pub struct JobResult {
    pub points: Vec<DataPoint>,
    pub raw_count: usize,
    pub kept_count: usize,
    pub calibration: Calibration,
    pub notes: Vec<String>,
}

impl JobResult {
    /// Packages the pass into a storable dataset record.
    pub fn to_dataset(&self, id: &str, name: &str, color: &str, timestamp_ms: u64) -> Dataset {
        Dataset {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            points: self.points.clone(),
            source_type: SourceType::Extracted,
            source_image_id: None,
            calibration: Some(self.calibration.clone()),
            created_at: timestamp_ms,
            updated_at: timestamp_ms,
        }
    }
}

/// Executes the full pipeline: calibrate, extract, filter, session.
#[derive(Clone)]
pub struct Runner {
    config: JobConfig,
    metrics: Arc<MetricsRecorder>,
}

impl Runner {
    pub fn new(config: JobConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    /// Runs the pipeline with the calibration declared in the job config.
    pub fn execute(&self, frame: &ImageFrame) -> anyhow::Result<JobResult> {
        let calibration = self.config.to_calibration().map_err(|err| {
            self.metrics.record_error();
            err
        })?;
        self.execute_calibrated(frame, &calibration)
    }

    /// Runs the pipeline against an externally supplied calibration
    /// (synthetic frames carry their own corner calibration).
    pub fn execute_calibrated(
        &self,
        frame: &ImageFrame,
        calibration: &Calibration,
    ) -> anyhow::Result<JobResult> {
        let target = TargetColor::from_hex(&self.config.color)
            .context("parsing target color")
            .map_err(|err| {
                self.metrics.record_error();
                err
            })?;
        let pipeline = self.config.effective_pipeline();

        let extractor = CurveExtractor::new(pipeline.clone());
        let raw = extractor.extract(frame, target, calibration);

        let filter = OutlierFilter::new(&pipeline);
        let kept = filter.apply(&raw);

        let mut session = EditSession::with_calibration(kept, calibration.clone());
        if let Some(ascending) = self.config.sort_ascending {
            session.sort_by_x(ascending);
        }

        let raw_count = raw.len();
        let kept_count = session.len();
        self.metrics.record_extraction(raw_count, kept_count);

        let notes = vec![
            format!("tolerance {:.1}", pipeline.tolerance),
            format!("raw {} kept {}", raw_count, kept_count),
        ];

        Ok(JobResult {
            points: session.points().to_vec(),
            raw_count,
            kept_count,
            calibration: calibration.clone(),
            notes,
        })
    }

    /// (extractions, points kept, points dropped, errors).
    pub fn metrics_snapshot(&self) -> (usize, usize, usize, usize) {
        self.metrics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::{build_chart_frame, corner_calibration, SyntheticChartConfig};

    fn synthetic_config() -> SyntheticChartConfig {
        SyntheticChartConfig {
            width: 120,
            height: 80,
            speckles: 6,
            seed: 7,
            ..SyntheticChartConfig::default()
        }
    }

    #[test]
    fn runner_extracts_a_synthetic_curve() {
        let synth = synthetic_config();
        let frame = build_chart_frame(&synth).unwrap();
        let calibration = corner_calibration(&synth).unwrap();

        let runner = Runner::new(JobConfig::from_args(&synth.curve_color, 30.0, 1));
        let result = runner.execute_calibrated(&frame, &calibration).unwrap();

        // Curve covers every column; a few speckle columns may be filtered.
        assert!(result.raw_count >= synth.width * 9 / 10);
        assert!(result.kept_count <= result.raw_count);
        assert!(result.kept_count > 0);
        assert_eq!(runner.metrics_snapshot().0, 1);
    }

    #[test]
    fn execute_without_calibration_records_an_error() {
        let synth = synthetic_config();
        let frame = build_chart_frame(&synth).unwrap();
        let runner = Runner::new(JobConfig::from_args("#0000ff", 30.0, 1));

        assert!(runner.execute(&frame).is_err());
        assert_eq!(runner.metrics_snapshot().3, 1);
    }

    #[test]
    fn result_packages_into_a_stored_dataset() {
        use curvecore::prelude::{MemoryStore, RecordStore};

        let synth = synthetic_config();
        let frame = build_chart_frame(&synth).unwrap();
        let calibration = corner_calibration(&synth).unwrap();
        let runner = Runner::new(JobConfig::from_args(&synth.curve_color, 30.0, 1));
        let result = runner.execute_calibrated(&frame, &calibration).unwrap();

        let mut store: MemoryStore<Dataset> = MemoryStore::new();
        let dataset = result.to_dataset("run-1", "synthetic pass", &synth.curve_color, 1_700_000);
        store.put("run-1", dataset);

        let stored = store.get("run-1").unwrap();
        assert_eq!(stored.source_type, SourceType::Extracted);
        assert_eq!(stored.points.len(), result.kept_count);
        assert!(stored.calibration.is_some());
        assert_eq!(stored.created_at, 1_700_000);
        assert_eq!(stored.updated_at, 1_700_000);
    }

    #[test]
    fn sort_option_orders_output() {
        let synth = synthetic_config();
        let frame = build_chart_frame(&synth).unwrap();
        let calibration = corner_calibration(&synth).unwrap();

        let mut config = JobConfig::from_args(&synth.curve_color, 30.0, 1);
        config.sort_ascending = Some(false);
        let runner = Runner::new(config);
        let result = runner.execute_calibrated(&frame, &calibration).unwrap();

        assert!(result.points.windows(2).all(|w| w[0].x >= w[1].x));
    }
}
