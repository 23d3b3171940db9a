use log::info;

pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }

    pub fn record_stage(&self, stage: &str, message: &str) {
        info!("{}: {}", stage, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
