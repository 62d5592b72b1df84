use serde::Serialize;
use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

/// Point-in-time copy of the query counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub queries: usize,
    pub rejected: usize,
    pub empty_results: usize,
    pub records_returned: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_served(&self, records: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.queries += 1;
            metrics.records_returned += records;
            if records == 0 {
                metrics.empty_results += 1;
            }
        }
    }

    pub fn record_rejected(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.rejected += 1;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = MetricsRecorder::new();
        metrics.record_served(3);
        metrics.record_served(0);
        metrics.record_rejected();
        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                queries: 2,
                rejected: 1,
                empty_results: 1,
                records_returned: 3,
            }
        );
    }
}
