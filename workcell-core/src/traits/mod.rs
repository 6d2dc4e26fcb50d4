//! Collaborator traits
//!
//! These traits define the interface between the workcell logic and the
//! environment it runs in. Pacing and wall-clock time are injected so the
//! same logic runs in real time from the CLI and instantly under test.

pub mod clock;
pub mod delay;

pub use clock::Clock;
pub use delay::Delay;
