use std::{cell::Cell, fmt, rc::Rc};

use chrono::{DateTime, TimeDelta, Utc};

/// Source of the current time for lending operations
pub trait Clock {
    /// Current wall-clock time
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to
///
/// Clones share the same instant, so a test can keep one handle and hand
/// another to the registry.
#[derive(Clone)]
pub struct ManualClock {
    /// Shared current instant
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Rc::new(Cell::new(start)) }
    }

    /// Move forward by `delta`; saturates at the current time on overflow
    pub fn advance(&self, delta: TimeDelta) {
        let current = self.now.get();
        self.now.set(current.checked_add_signed(delta).unwrap_or(current));
    }
}

impl fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualClock").field("now", &self.now.get()).finish()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn manual_clock_handles_share_time() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default();
        let clock = ManualClock::new(start);
        let handle = clock.clone();

        handle.advance(TimeDelta::days(10));
        assert_eq!(clock.now().signed_duration_since(start), TimeDelta::days(10));

        clock.advance(TimeDelta::days(-10));
        assert_eq!(handle.now(), start);
    }
}
