use std::{cell::Cell, rc::Rc, time::Duration};

use crate::Clock;

/// A [`Clock`] that only moves when told to
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Move the clock forward by `step`
    pub fn advance(&self, step: Duration) {
        self.now.set(self.now.get() + step);
    }

    /// Set the clock to `now`. Nothing stops this going backwards.
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
