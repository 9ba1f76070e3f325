use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Time source for the store: a monotonic clock for debouncing plus wall
/// time for id generation.
pub trait Clock {
    fn now(&self) -> Instant;
    /// Milliseconds since the Unix epoch
    fn wall_millis(&self) -> i64;
    /// Block until `deadline`. Clocks that are not real time just advance.
    fn sleep_until(&self, deadline: Instant);
}

/// The real clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    fn sleep_until(&self, deadline: Instant) {
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can hand one to the store and keep
/// another to advance.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    origin_millis: i64,
    elapsed: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Starts at 2023-11-14T22:13:20Z
    pub fn new() -> Self {
        Self::starting_at(1_700_000_000_000)
    }

    pub fn starting_at(wall_millis: i64) -> Self {
        ManualClock {
            origin: Instant::now(),
            origin_millis: wall_millis,
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }

    fn wall_millis(&self) -> i64 {
        let elapsed = i64::try_from(self.elapsed.get().as_millis()).unwrap_or(i64::MAX);
        self.origin_millis.saturating_add(elapsed)
    }

    fn sleep_until(&self, deadline: Instant) {
        let now = self.now();
        if deadline > now {
            self.advance(deadline - now);
        }
    }
}
