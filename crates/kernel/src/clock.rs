use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic time source, measured from an arbitrary fixed epoch.
pub trait TimeSource {
    fn now(&self) -> Duration;
}

/// Wall-clock source backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    epoch: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Hand-driven time source for headless runs and tests.
#[derive(Debug, Default)]
pub struct ManualTime {
    now: Cell<Duration>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Elapsed-time clock. Started once at construction and never reset.
#[derive(Clone)]
pub struct Clock {
    source: Rc<dyn TimeSource>,
    start: Duration,
}

impl Clock {
    pub fn new(source: Rc<dyn TimeSource>) -> Self {
        let start = source.now();
        Self { source, start }
    }

    /// Time since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.source.now().saturating_sub(self.start)
    }
}

impl std::fmt::Debug for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clock")
            .field("elapsed", &self.elapsed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_measures_from_creation() {
        let time = Rc::new(ManualTime::new());
        time.advance(Duration::from_secs(5));
        let clock = Clock::new(time.clone());
        assert_eq!(clock.elapsed(), Duration::ZERO);

        time.advance(Duration::from_millis(1500));
        assert_eq!(clock.elapsed(), Duration::from_millis(1500));
    }

    #[test]
    fn clock_never_goes_negative() {
        let time = Rc::new(ManualTime::new());
        time.set(Duration::from_secs(2));
        let clock = Clock::new(time.clone());
        time.set(Duration::from_secs(1));
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn monotonic_time_advances() {
        let clock = Clock::new(Rc::new(MonotonicTime::new()));
        let a = clock.elapsed();
        let b = clock.elapsed();
        assert!(b >= a);
    }
}
