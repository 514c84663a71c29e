use crate::math::stats::StatsHelper;
use crate::telemetry::log::StageLog;
use crate::{DataPoint, PipelineConfig};

/// Rolling-window sigma filter over the raw extracted sequence.
///
/// Removes samples whose data-space y deviates abnormally from their
/// local neighborhood: stray color matches from axis text, gridlines, or
/// another curve briefly sharing the tolerance band. Window width and
/// the sigma threshold come from [`PipelineConfig`]; the 11/3.0 defaults
/// are tuning constants, not fixed law.
pub struct OutlierFilter {
    window: usize,
    sigma_limit: f64,
    logger: StageLog,
}

impl OutlierFilter {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            window: config.outlier_window,
            sigma_limit: config.sigma_limit,
            logger: StageLog::new("filter"),
        }
    }

    /// Single pass over the original sequence; each point's window is
    /// computed from the unfiltered input, so one removal never cascades
    /// into its neighbors' verdicts. Sequences shorter than the window
    /// pass through unchanged.
    pub fn apply(&self, points: &[DataPoint]) -> Vec<DataPoint> {
        if points.len() < self.window {
            return points.to_vec();
        }

        let half = self.window / 2;
        let mut kept = Vec::with_capacity(points.len());

        for (i, point) in points.iter().enumerate() {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(points.len());
            let ys: Vec<f64> = points[start..end].iter().map(|p| p.y).collect();

            let mean = StatsHelper::mean(&ys);
            let sigma = StatsHelper::sigma(&ys);

            // A flat window has no outliers by definition.
            if sigma == 0.0 || (point.y - mean).abs() <= self.sigma_limit * sigma {
                kept.push(*point);
            }
        }

        let removed = points.len() - kept.len();
        if removed > 0 {
            self.logger
                .record(&format!("removed {} of {} points", removed, points.len()));
        } else {
            self.logger.detail("no outliers removed");
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> OutlierFilter {
        OutlierFilter::new(&PipelineConfig::default())
    }

    fn line(n: usize) -> Vec<DataPoint> {
        (0..n)
            .map(|i| DataPoint::new(i as f64, 2.0 * i as f64))
            .collect()
    }

    #[test]
    fn short_sequence_passes_through_unchanged() {
        let points = line(5);
        assert_eq!(filter().apply(&points), points);
    }

    #[test]
    fn smooth_monotonic_sequence_is_untouched() {
        let points = line(40);
        assert_eq!(filter().apply(&points), points);
    }

    #[test]
    fn constant_sequence_is_untouched() {
        let points: Vec<DataPoint> = (0..20).map(|i| DataPoint::new(i as f64, 7.0)).collect();
        assert_eq!(filter().apply(&points), points);
    }

    #[test]
    fn isolated_spike_is_removed() {
        let mut points = line(30);
        points[15].y = 500.0;
        let kept = filter().apply(&points);
        assert_eq!(kept.len(), 29);
        assert!(kept.iter().all(|p| p.y < 400.0));
    }

    #[test]
    fn separated_spikes_are_each_removed() {
        let mut points = line(30);
        points[8].y = 500.0;
        points[22].y = 500.0;
        let kept = filter().apply(&points);
        assert_eq!(kept.len(), 28);
        assert!(kept.iter().all(|p| p.y < 400.0));
    }

    #[test]
    fn window_size_is_configurable() {
        let config = PipelineConfig {
            outlier_window: 25,
            ..PipelineConfig::default()
        };
        let points = line(20);
        // Shorter than the configured window: untouched even with a spike.
        let mut spiked = points.clone();
        spiked[10].y = 999.0;
        assert_eq!(OutlierFilter::new(&config).apply(&spiked), spiked);
    }
}
