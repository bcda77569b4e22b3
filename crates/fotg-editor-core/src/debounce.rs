//! Trailing-edge debounce for preview renders.
//!
//! Pure timing: the debouncer never renders anything itself. The host arms a
//! timer for [`RenderDebouncer::sleep_duration`] and calls
//! [`RenderDebouncer::take_if_ready`] when it fires. Every `schedule` pushes
//! the deadline back, so at most one render is ever pending.

use std::time::Duration;

use web_time::Instant;

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

struct PendingRender {
    text: String,
    deadline: Instant,
}

pub struct RenderDebouncer {
    delay: Duration,
    pending: Option<PendingRender>,
}

impl Default for RenderDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }
}

impl RenderDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record the latest text and restart the quiet period.
    ///
    /// Any previously pending text is discarded. Returns the delay until the
    /// render becomes due.
    pub fn schedule(&mut self, text: String, now: Instant) -> Duration {
        let replaced = self.pending.is_some();
        self.pending = Some(PendingRender {
            text,
            deadline: now + self.delay,
        });
        tracing::trace!(replaced, delay_ms = self.delay.as_millis() as u64, "render scheduled");
        self.delay
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_ready(&self, now: Instant) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| now >= pending.deadline)
    }

    /// Take the pending text once its quiet period has elapsed.
    pub fn take_if_ready(&mut self, now: Instant) -> Option<String> {
        if !self.is_ready(now) {
            return None;
        }
        self.pending.take().map(|pending| pending.text)
    }

    /// Time left until the pending render is due, or `None` when idle.
    ///
    /// Never returns zero for a pending render that is not yet due, so a
    /// timer armed with it cannot spin.
    pub fn sleep_duration(&self, now: Instant) -> Option<Duration> {
        let pending = self.pending.as_ref()?;
        if now >= pending.deadline {
            return Some(Duration::ZERO);
        }
        Some(
            pending
                .deadline
                .saturating_duration_since(now)
                .max(Duration::from_millis(1)),
        )
    }

    /// Drop the pending render, returning its text.
    pub fn cancel(&mut self) -> Option<String> {
        self.pending.take().map(|pending| pending.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_burst_yields_only_the_last_text() {
        let start = Instant::now();
        let mut debouncer = RenderDebouncer::default();

        debouncer.schedule("a".into(), start);
        debouncer.schedule("ab".into(), start + ms(100));
        debouncer.schedule("abc".into(), start + ms(250));

        // 300ms after the first change, but only 50ms after the last
        assert_eq!(debouncer.take_if_ready(start + ms(300)), None);
        assert_eq!(debouncer.take_if_ready(start + ms(550)), Some("abc".into()));
        assert_eq!(debouncer.take_if_ready(start + ms(900)), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_sleep_duration_tracks_deadline() {
        let start = Instant::now();
        let mut debouncer = RenderDebouncer::new(ms(300));
        assert_eq!(debouncer.sleep_duration(start), None);

        debouncer.schedule("x".into(), start);
        assert_eq!(debouncer.sleep_duration(start + ms(100)), Some(ms(200)));
        assert_eq!(debouncer.sleep_duration(start + ms(299)), Some(ms(1)));
        assert_eq!(debouncer.sleep_duration(start + ms(400)), Some(Duration::ZERO));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut debouncer = RenderDebouncer::default();
        debouncer.schedule("x".into(), start);
        assert_eq!(debouncer.cancel(), Some("x".into()));
        assert_eq!(debouncer.take_if_ready(start + ms(1000)), None);
    }
}
