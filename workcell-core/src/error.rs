//! Handling errors
//!
//! Raised synchronously by the device or robot operation that detects the
//! violation. Every variant carries the identifiers needed to render a
//! diagnostic.

use thiserror::Error;

use crate::plate::PlateId;

/// Errors raised by device, robot and transfer operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellError {
    /// Robot asked to pick while its gripper already holds a plate
    #[error("{robot} already holding plate {plate}")]
    GripperOccupied { robot: String, plate: PlateId },

    /// Robot asked to place with an empty gripper
    #[error("{robot} not holding a plate")]
    GripperEmpty { robot: String },

    /// Device asked to give up or process a plate it does not have
    #[error("{device} has no plate")]
    EmptyDevice { device: String },

    /// Device asked to accept a plate while already holding one
    #[error("{device} already has plate {plate}")]
    AlreadyLoaded { device: String, plate: PlateId },

    /// Device name not registered in the workcell
    #[error("unknown device {name}")]
    UnknownDevice { name: String },
}

impl CellError {
    /// Short machine-friendly name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::GripperOccupied { .. } => "gripper_occupied",
            Self::GripperEmpty { .. } => "gripper_empty",
            Self::EmptyDevice { .. } => "empty_device",
            Self::AlreadyLoaded { .. } => "already_loaded",
            Self::UnknownDevice { .. } => "unknown_device",
        }
    }
}
