use std::time::Duration;

/// Repeating timer driven by the elapsed time its owner feeds it.
///
/// Several intervals passing inside one `advance` ring once; the timer does
/// not try to catch up. A cancelled timer never rings again.
pub struct RepeatingTimer {
    interval: Duration,
    elapsed: Duration,
    cancelled: bool,
}

impl RepeatingTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            cancelled: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Moves the timer forward, returning whether it rang
    pub fn advance(&mut self, delta: Duration) -> bool {
        if self.cancelled {
            return false;
        }
        if self.interval.is_zero() {
            return true;
        }

        self.elapsed += delta;
        if self.elapsed < self.interval {
            return false;
        }

        let interval_nanos = self.interval.as_nanos();
        let remainder = self.elapsed.as_nanos() % interval_nanos;
        self.elapsed = Duration::from_nanos(remainder as u64);
        true
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.elapsed = Duration::ZERO;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
