//! Timing helpers for render instrumentation.

use web_time::Instant;

/// A guard that logs elapsed time when dropped.
pub struct TimingGuard {
    label: &'static str,
    start: Instant,
}

impl TimingGuard {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(elapsed_ms, "{}", self.label);
    }
}
