use log::{debug, info};

/// Logger scoped to one pipeline stage, so extraction and filtering
/// passes are attributable in mixed output.
pub struct StageLog {
    stage: &'static str,
}

impl StageLog {
    pub fn new(stage: &'static str) -> Self {
        Self { stage }
    }

    pub fn record(&self, message: &str) {
        info!("{}", self.prefixed(message));
    }

    /// Chatty per-call details go to debug level.
    pub fn detail(&self, message: &str) {
        debug!("{}", self.prefixed(message));
    }

    fn prefixed(&self, message: &str) -> String {
        format!("[{}] {}", self.stage, message)
    }
}
