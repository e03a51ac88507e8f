use std::time::{Duration, Instant};

/// A monotonic time source. Frame times are measured against it.
pub trait Clock {
    /// Time since some fixed point in the past. Must never go backwards.
    fn now(&self) -> Duration;
}

/// [`Clock`] backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}
