//! Wall-clock trait
//!
//! Used to timestamp transfer log entries and to bracket protocol runs.

use chrono::NaiveDateTime;

/// Source of the current local time
pub trait Clock {
    /// Current local date and time
    fn now(&self) -> NaiveDateTime;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
