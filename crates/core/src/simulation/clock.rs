//! Tick sources
//!
//! A [`TickSource`] decides when the next simulation tick happens. Real-time frontends
//! use [`FixedRate`], which paces ticks to the display refresh interval; headless runs and
//! tests use [`TickCount`], which yields a fixed number of ticks immediately.

use crate::error::ConfigError;
use std::time::{Duration, Instant};

/// Something that schedules ticks.
pub trait TickSource {
    /// Block until the next tick is due. Returns `false` once the source is exhausted.
    fn next_tick(&mut self) -> bool;
}

/// Yields exactly `remaining` ticks without waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickCount {
    remaining: u64,
}

impl TickCount {
    pub fn new(ticks: u64) -> Self {
        Self { remaining: ticks }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl TickSource for TickCount {
    fn next_tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Paces ticks at a fixed interval, never ending.
///
/// If the driver falls more than one interval behind (a slow frame, a suspended
/// terminal) the schedule restarts from now instead of bursting through missed ticks.
#[derive(Debug, Clone)]
pub struct FixedRate {
    interval: Duration,
    next: Instant,
}

impl FixedRate {
    /// The first tick is due immediately.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: Instant::now(),
        }
    }

    /// Pace ticks at `hz` per second.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRefreshRate`] unless `hz` is finite and positive.
    pub fn from_hz(hz: f64) -> Result<Self, ConfigError> {
        if !(hz.is_finite() && hz > 0.0) {
            return Err(ConfigError::InvalidRefreshRate(hz));
        }
        Ok(Self::new(Duration::from_secs_f64(1.0 / hz)))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left before the next tick is due; zero if it is already due.
    ///
    /// Frontends use this as the timeout when polling for input between ticks.
    pub fn until_next(&self) -> Duration {
        self.next.saturating_duration_since(Instant::now())
    }
}

impl TickSource for FixedRate {
    fn next_tick(&mut self) -> bool {
        let wait = self.until_next();
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }

        self.next += self.interval;
        let now = Instant::now();
        if self.next + self.interval < now {
            self.next = now + self.interval;
        }
        true
    }
}
