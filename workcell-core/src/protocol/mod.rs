//! Protocols
//!
//! A protocol is an ordered list of transfer, process and homing steps.
//! The runner executes them against a [`Workcell`](crate::Workcell):
//! transfer failures are logged and the run continues, process failures
//! abort the run.

pub mod runner;
pub mod screening;
pub mod step;

pub use runner::{ProtocolError, RunReport, StepOutcome, StepRecord};
pub use step::{Protocol, ProtocolStep, StepAction};
