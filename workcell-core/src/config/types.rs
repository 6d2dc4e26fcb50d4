//! Configuration type definitions
//!
//! These types are plain data. With the `serde` feature they deserialize
//! from the TOML layout used by the simulator:
//!
//! ```toml
//! name = "Cell Line Screening Workcell"
//!
//! [robot]
//! name = "RobotArm"
//! speed_mm_s = 100.0
//!
//! [[device]]
//! name = "Storage"
//! x = 100.0
//! y = 200.0
//! z = 50.0
//!
//! [[plate]]
//! device = "Storage"
//! id = "CELL_CULTURE_PLATE_001"
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::position::SpatialPosition;
use crate::robot::DEFAULT_SPEED_MM_S;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Plate id placed in Storage by the reference layout
pub const REFERENCE_PLATE: &str = "CELL_CULTURE_PLATE_001";

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Two devices share a name
    #[error("duplicate device name {0}")]
    DuplicateDevice(String),

    /// A device or robot has an empty name
    #[error("names must not be empty")]
    EmptyName,

    /// Robot speed is zero, negative or not a number
    #[error("robot speed must be positive, got {0}")]
    InvalidSpeed(String),

    /// Initial plate placed in a device that does not exist
    #[error("plate {plate} placed in unknown device {device}")]
    UnknownPlacementDevice { device: String, plate: String },

    /// Two initial plates placed in the same device
    #[error("device {device} already holds a plate; cannot also place {plate}")]
    DevicePlacedTwice { device: String, plate: String },

    /// The same plate id placed more than once
    #[error("plate {plate} is already placed")]
    DuplicatePlate { plate: String },
}

/// Fixed 3D coordinate (mm)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionConfig {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl PositionConfig {
    /// Create a coordinate
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Attach a label
    pub fn to_position(self, label: &str) -> SpatialPosition {
        SpatialPosition::new(self.x, self.y, self.z, label)
    }
}

/// Robot arm configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct RobotConfig {
    /// Arm name
    pub name: String,
    /// Travel speed (mm/s)
    pub speed_mm_s: f32,
    /// Home position
    pub home: PositionConfig,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            name: "RobotArm".into(),
            speed_mm_s: DEFAULT_SPEED_MM_S,
            home: PositionConfig::default(),
        }
    }
}

/// Device configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    /// Device name (unique)
    pub name: String,
    /// X coordinate (mm)
    pub x: f32,
    /// Y coordinate (mm)
    pub y: f32,
    /// Z coordinate (mm)
    pub z: f32,
}

impl DeviceConfig {
    /// Create a device entry
    pub fn new(name: &str, x: f32, y: f32, z: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            z,
        }
    }

    /// Position labelled with the device name
    pub fn position(&self) -> SpatialPosition {
        SpatialPosition::new(self.x, self.y, self.z, self.name.as_str())
    }
}

/// Initial plate placement
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementConfig {
    /// Device the plate starts in
    pub device: String,
    /// Plate id
    pub id: String,
}

/// A single protocol step
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "action", rename_all = "snake_case"))]
pub enum StepConfig {
    /// Move a plate between devices
    Transfer {
        title: String,
        plate: String,
        from: String,
        to: String,
    },
    /// Run the device's process on its plate
    Process {
        title: String,
        device: String,
        duration_s: u16,
    },
    /// Send the robot home
    ReturnHome { title: String },
}

/// Protocol configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ProtocolConfig {
    /// Display label
    pub label: String,
    /// Steps in execution order
    #[cfg_attr(feature = "serde", serde(rename = "step"))]
    pub steps: Vec<StepConfig>,
}

/// Complete workcell configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct WorkcellConfig {
    /// Workcell name
    pub name: String,
    /// Robot arm
    pub robot: RobotConfig,
    /// Devices in registration order
    #[cfg_attr(feature = "serde", serde(rename = "device"))]
    pub devices: Vec<DeviceConfig>,
    /// Initial plate placement
    #[cfg_attr(feature = "serde", serde(rename = "plate"))]
    pub plates: Vec<PlacementConfig>,
    /// Custom protocol; the cell screening protocol runs when absent
    pub protocol: Option<ProtocolConfig>,
}

impl Default for WorkcellConfig {
    fn default() -> Self {
        Self {
            name: "Workcell".into(),
            robot: RobotConfig::default(),
            devices: Vec::new(),
            plates: Vec::new(),
            protocol: None,
        }
    }
}

impl WorkcellConfig {
    /// The reference cell screening layout
    ///
    /// Five devices, one plate in Storage, default robot at the origin.
    pub fn reference() -> Self {
        Self {
            name: "Cell Line Screening Workcell".into(),
            robot: RobotConfig::default(),
            devices: vec![
                DeviceConfig::new("Storage", 100.0, 200.0, 50.0),
                DeviceConfig::new("LiquidHandler", 400.0, 200.0, 100.0),
                DeviceConfig::new("ThermalCycler", 700.0, 200.0, 80.0),
                DeviceConfig::new("PlateReader", 1000.0, 200.0, 90.0),
                DeviceConfig::new("Centrifuge", 550.0, 400.0, 75.0),
            ],
            plates: vec![PlacementConfig {
                device: "Storage".into(),
                id: REFERENCE_PLATE.into(),
            }],
            protocol: None,
        }
    }

    /// Find a device by name
    pub fn find_device(&self, name: &str) -> Option<&DeviceConfig> {
        self.devices.iter().find(|d| d.name == name)
    }

    /// Check names, speed and placements
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.robot.name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        let speed = self.robot.speed_mm_s;
        if !(speed.is_finite() && speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(speed.to_string()));
        }

        let mut names = HashSet::new();
        for device in &self.devices {
            if device.name.is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if !names.insert(device.name.as_str()) {
                return Err(ConfigError::DuplicateDevice(device.name.clone()));
            }
        }

        let mut occupied = HashSet::new();
        let mut placed = HashSet::new();
        for placement in &self.plates {
            if !names.contains(placement.device.as_str()) {
                return Err(ConfigError::UnknownPlacementDevice {
                    device: placement.device.clone(),
                    plate: placement.id.clone(),
                });
            }
            if !occupied.insert(placement.device.as_str()) {
                return Err(ConfigError::DevicePlacedTwice {
                    device: placement.device.clone(),
                    plate: placement.id.clone(),
                });
            }
            if !placed.insert(placement.id.as_str()) {
                return Err(ConfigError::DuplicatePlate {
                    plate: placement.id.clone(),
                });
            }
        }

        Ok(())
    }
}
