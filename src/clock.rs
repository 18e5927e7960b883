use std::time::Instant;

/// Source of monotonic "now" readings for timers.
///
/// Elapsed time is deliberately clock-monotonic: a system clock
/// adjustment mid-run never distorts an accumulating timer. Calendar
/// output (export dates, generated lines) uses `chrono::Local` instead.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The real monotonic clock
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-cranked clock for tests; no wall waits needed
#[cfg(test)]
pub struct ManualClock {
    base: Instant,
    offset: std::cell::Cell<std::time::Duration>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: std::cell::Cell::new(std::time::Duration::ZERO),
        }
    }

    pub fn advance_secs(&self, secs: u64) {
        let next = self.offset.get() + std::time::Duration::from_secs(secs);
        self.offset.set(next);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}

#[cfg(test)]
impl Clock for std::rc::Rc<ManualClock> {
    fn now(&self) -> Instant {
        self.as_ref().now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new();
        let t0 = clock.now();
        clock.advance_secs(65);
        assert_eq!((clock.now() - t0).as_secs(), 65);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
