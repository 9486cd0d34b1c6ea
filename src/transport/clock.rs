use super::Clock;
use std::time::Instant;

/// Clock backed by the operating system's monotonic time
///
/// Microseconds are counted from the creation of the clock, and wrap every ~71 minutes as the driver expects from a 32 bit counter.
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: Instant
}

impl SystemClock {
    pub fn new() -> SystemClock {
        SystemClock {
            origin: Instant::now()
        }
    }
}

impl Default for SystemClock {
    fn default() -> SystemClock {
        SystemClock::new()
    }
}

impl Clock for SystemClock {
    fn now_micros(&self) -> u32 {
        // Truncation is the wrap around
        self.origin.elapsed().as_micros() as u32
    }

    fn yield_now(&mut self) {
        std::thread::yield_now();
    }
}

/// Simulated clock that only advances while the driver waits
///
/// Every call to `yield_now` moves time forward by a fixed step, so waits finish instantly in wall time while the total simulated time stays observable. Pair it with a [Recorder](crate::transport::Recorder) for dry runs.
///
/// ```rust
/// use thermal_rs::transport::{Clock, VirtualClock};
///
/// let mut clock = VirtualClock::new();
/// clock.yield_now();
/// assert_eq!(100, clock.now_micros());
/// ```
#[derive(Clone, Debug)]
pub struct VirtualClock {
    now: u32,
    step: u32,
    yields: u64
}

impl VirtualClock {
    /// Starts at zero, advancing 100us per yield
    pub fn new() -> VirtualClock {
        VirtualClock::starting_at(0)
    }

    /// Starts at an arbitrary counter value, useful to exercise the wrap around
    pub fn starting_at(now: u32) -> VirtualClock {
        VirtualClock {
            now,
            step: 100,
            yields: 0
        }
    }

    /// Changes how many microseconds each yield is worth. A zero step is bumped to one.
    pub fn with_step(mut self, step: u32) -> VirtualClock {
        self.step = step.max(1);
        self
    }

    /// Moves the clock forward without yielding
    pub fn advance(&mut self, micros: u32) {
        self.now = self.now.wrapping_add(micros);
    }

    /// Number of times the driver yielded while waiting
    pub fn yields(&self) -> u64 {
        self.yields
    }
}

impl Default for VirtualClock {
    fn default() -> VirtualClock {
        VirtualClock::new()
    }
}

impl Clock for VirtualClock {
    fn now_micros(&self) -> u32 {
        self.now
    }

    fn yield_now(&mut self) {
        self.yields += 1;
        self.now = self.now.wrapping_add(self.step);
    }
}
