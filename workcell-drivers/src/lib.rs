//! Collaborator implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in workcell-core:
//!
//! - Delays (thread sleep, instant with accounting)
//! - Clocks (system local time, manual)

#![deny(unsafe_code)]

pub mod clock;
pub mod delay;

pub use clock::{ManualClock, SystemClock};
pub use delay::{InstantDelay, ThreadDelay};
