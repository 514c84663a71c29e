use std::sync::Mutex;

/// Counters for extraction runs, shared between the runner and bridge.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    extractions: usize,
    points_kept: usize,
    points_dropped: usize,
    errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                extractions: 0,
                points_kept: 0,
                points_dropped: 0,
                errors: 0,
            }),
        }
    }

    pub fn record_extraction(&self, raw: usize, kept: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.extractions += 1;
            metrics.points_kept += kept;
            metrics.points_dropped += raw.saturating_sub(kept);
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
        }
    }

    /// (extractions, points kept, points dropped, errors).
    pub fn snapshot(&self) -> (usize, usize, usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (
                metrics.extractions,
                metrics.points_kept,
                metrics.points_dropped,
                metrics.errors,
            )
        } else {
            (0, 0, 0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
