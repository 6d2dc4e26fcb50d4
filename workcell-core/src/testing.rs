//! Test doubles for the collaborator traits

use chrono::{NaiveDate, NaiveDateTime};

use crate::traits::{Clock, Delay};

/// Delay that returns immediately and records what was requested
#[derive(Debug, Default)]
pub struct NoDelay {
    pub total_ms: u64,
    pub calls: usize,
}

impl Delay for NoDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += u64::from(ms);
        self.calls += 1;
    }
}

/// Clock frozen at a fixed instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Default for FixedClock {
    fn default() -> Self {
        let at = NaiveDate::from_ymd_opt(2024, 5, 14)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .expect("valid fixed timestamp");
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
