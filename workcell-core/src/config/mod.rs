//! Configuration types
//!
//! Construction-time description of a workcell: devices and their fixed
//! positions, the robot, initial plate placement and an optional protocol.

pub mod types;

pub use types::*;
