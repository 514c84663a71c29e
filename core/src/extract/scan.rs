use crate::calibrate::Calibration;
use crate::extract::color::TargetColor;
use crate::extract::frame::ImageFrame;
use crate::math::stats::StatsHelper;
use crate::telemetry::log::StageLog;
use crate::{DataPoint, PipelineConfig, PixelPoint};
use ndarray::Array2;

/// Column scanner turning raster pixels into data-space samples.
///
/// Stateless across calls: the same frame, target, and calibration
/// always produce the same output, so callers may debounce or discard
/// superseded invocations freely.
pub struct CurveExtractor {
    config: PipelineConfig,
    logger: StageLog,
}

impl CurveExtractor {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            logger: StageLog::new("extract"),
        }
    }

    /// Extracts one candidate point per scanned column.
    ///
    /// A column with no pixel within tolerance of the target contributes
    /// nothing (curves may have gaps); otherwise the median matched row
    /// pairs with the column index and converts through the calibration.
    /// Output is in increasing column order.
    pub fn extract(
        &self,
        frame: &ImageFrame,
        target: TargetColor,
        calibration: &Calibration,
    ) -> Vec<DataPoint> {
        let step = self.config.sample_step.max(1);
        let mut points = Vec::new();
        let mut matched_rows: Vec<f64> = Vec::new();

        let mut x = 0;
        while x < frame.width() {
            matched_rows.clear();
            for y in 0..frame.height() {
                let (r, g, b) = frame.rgb_at(x, y);
                if target.distance(r, g, b) < self.config.tolerance {
                    matched_rows.push(y as f64);
                }
            }

            if !matched_rows.is_empty() {
                let row = StatsHelper::median(&matched_rows);
                points.push(calibration.pixel_to_data(PixelPoint::new(x as f64, row)));
            }
            x += step;
        }

        self.logger.record(&format!(
            "scanned {}x{} -> {} points",
            frame.width(),
            frame.height(),
            points.len()
        ));
        points
    }

    /// Dense per-pixel match mask (height x width), 1 = within tolerance.
    ///
    /// Visualization side channel only; the data pipeline never reads it.
    pub fn match_mask(&self, frame: &ImageFrame, target: TargetColor) -> Array2<u8> {
        self.logger.detail(&format!(
            "building {}x{} match mask",
            frame.width(),
            frame.height()
        ));
        let mut mask = Array2::zeros((frame.height(), frame.width()));
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                let (r, g, b) = frame.rgb_at(x, y);
                if target.distance(r, g, b) < self.config.tolerance {
                    mask[[y, x]] = 1;
                }
            }
        }
        mask
    }
}
