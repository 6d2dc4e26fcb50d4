//! Core logic for the plate-handling workcell
//!
//! This crate contains all application logic that does not depend on
//! how the cell is paced or presented:
//!
//! - Collaborator traits (delay, clock)
//! - Device state machine and plate custody
//! - Robot arm moves, picks and places
//! - Transfer orchestration and the protocol log
//! - Protocol definitions and the step runner
//! - Configuration type definitions

#![deny(unsafe_code)]

pub mod config;
pub mod device;
pub mod error;
pub mod log;
pub mod plate;
pub mod position;
pub mod protocol;
pub mod robot;
pub mod traits;
pub mod workcell;

pub use device::{Device, DeviceEvent, DeviceState};
pub use error::CellError;
pub use log::{LogSummary, ProtocolLog, TransferLogEntry, TransferOutcome};
pub use plate::PlateId;
pub use position::SpatialPosition;
pub use protocol::{Protocol, ProtocolError, ProtocolStep, RunReport, StepAction};
pub use robot::{Move, RobotArm};
pub use workcell::Workcell;

#[cfg(test)]
pub(crate) mod testing;
