//! Delay implementations

use std::thread;
use std::time::Duration;

use tracing::trace;
use workcell_core::traits::Delay;

/// Blocks the calling thread for the requested time
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay_ms(&mut self, ms: u32) {
        if ms > 0 {
            thread::sleep(Duration::from_millis(u64::from(ms)));
        }
    }
}

/// Returns immediately, keeping a tally of simulated time
///
/// Used for instant runs: the report can still show how long the run
/// would have taken in real time.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantDelay {
    simulated_ms: u64,
    calls: u32,
}

impl InstantDelay {
    /// Create a delay with an empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Total simulated time (ms)
    pub fn simulated_ms(&self) -> u64 {
        self.simulated_ms
    }

    /// Simulated time as a duration
    pub fn simulated(&self) -> Duration {
        Duration::from_millis(self.simulated_ms)
    }

    /// Number of dwell requests
    pub fn calls(&self) -> u32 {
        self.calls
    }
}

impl Delay for InstantDelay {
    fn delay_ms(&mut self, ms: u32) {
        trace!(ms, "skipping dwell");
        self.simulated_ms = self.simulated_ms.saturating_add(u64::from(ms));
        self.calls = self.calls.saturating_add(1);
    }
}
