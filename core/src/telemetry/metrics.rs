use std::sync::Mutex;

/// Point-in-time copy of the session counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub samples: usize,
    pub events: usize,
    pub rejected: usize,
    pub sink_failures: usize,
}

/// Session counters: samples processed, events emitted, non-finite samples
/// rejected, and sink dispatch failures.
pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_sample(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.samples += 1;
        }
    }

    pub fn record_event(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.events += 1;
        }
    }

    pub fn record_rejected(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.rejected += 1;
        }
    }

    pub fn record_sink_failure(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.sink_failures += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
