//! Clock implementations

use std::cell::Cell;

use chrono::{Local, NaiveDateTime, TimeDelta};
use workcell_core::traits::Clock;

/// Local wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock that only moves when told to
///
/// With a non-zero tick every read advances the clock, which gives distinct,
/// increasing timestamps in instant runs.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<NaiveDateTime>,
    tick: TimeDelta,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(start),
            tick: TimeDelta::zero(),
        }
    }

    /// Advance by `tick` after every read
    pub fn with_tick(mut self, tick: TimeDelta) -> Self {
        self.tick = tick;
        self
    }

    /// Move the clock forward
    pub fn advance(&self, by: TimeDelta) {
        self.now.set(self.now.get() + by);
    }

    /// Current time without ticking
    pub fn peek(&self) -> NaiveDateTime {
        self.now.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        let at = self.now.get();
        self.now.set(at + self.tick);
        at
    }
}
