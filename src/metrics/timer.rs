use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Lock-free latency aggregate: sample count and summed duration.
#[derive(Debug, Default)]
pub struct TimerStat {
    count: AtomicU64,
    total_nanos: AtomicU64,
}

impl TimerStat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sample.
    pub fn record(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.count.fetch_add(1, Ordering::Relaxed);
        self.total_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    /// Number of samples recorded.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Sum of all samples.
    pub fn total(&self) -> Duration {
        Duration::from_nanos(self.total_nanos.load(Ordering::Relaxed))
    }

    /// Mean sample in milliseconds, 0.0 when nothing was recorded.
    pub fn mean_ms(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            0.0
        } else {
            self.total().as_secs_f64() * 1000.0 / count as f64
        }
    }

    pub fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
        self.total_nanos.store(0, Ordering::Relaxed);
    }
}

/// Helper for timing an operation.
pub struct OperationTimer {
    start: Instant,
    operation: &'static str,
}

impl OperationTimer {
    /// Start timing.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    /// Stop timing and return the elapsed duration.
    pub fn finish(self) -> Duration {
        let elapsed = self.start.elapsed();

        tracing::trace!(
            operation = %self.operation,
            duration_us = elapsed.as_micros() as u64,
            "Operation timed"
        );

        elapsed
    }
}
