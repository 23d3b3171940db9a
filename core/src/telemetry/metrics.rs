use std::sync::Mutex;

/// Counters accumulated across workflow runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub runs: usize,
    pub samples_emitted: usize,
    pub errors: usize,
}

pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_run(&self, sample_count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.runs += 1;
            metrics.samples_emitted += sample_count;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
