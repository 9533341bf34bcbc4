//! Clocks feeding the fixed-timestep loop

use std::time::Instant;

/// Seconds elapsed since the clock started
pub trait Clock {
    fn now(&self) -> f64;
}

/// Real time, via `Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// A clock that only moves when told to (replays, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    t: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: f64) {
        self.t += dt;
    }

    /// Jump to `t`, never backwards
    pub fn set(&mut self, t: f64) {
        self.t = self.t.max(t);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.t
    }
}
