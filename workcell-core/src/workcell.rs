//! Workcell orchestration
//!
//! The workcell owns the robot, the devices and the protocol log, and is the
//! only place any of them is mutated. `transfer_plate` is the boundary where
//! handling errors are caught and turned into log entries.

use tracing::{info, warn};

use crate::config::{ConfigError, WorkcellConfig};
use crate::device::Device;
use crate::error::CellError;
use crate::log::{ProtocolLog, TransferLogEntry};
use crate::plate::PlateId;
use crate::robot::{Move, RobotArm};
use crate::traits::{Clock, Delay};

/// A robot arm and its devices
///
/// `D` paces the simulated dwell times, `C` timestamps log entries.
#[derive(Debug)]
pub struct Workcell<D, C> {
    name: String,
    robot: RobotArm,
    /// Devices in registration order
    devices: Vec<Device>,
    log: ProtocolLog,
    delay: D,
    clock: C,
}

impl<D: Delay, C: Clock> Workcell<D, C> {
    /// Create a workcell with no devices
    pub fn new(name: impl Into<String>, robot: RobotArm, delay: D, clock: C) -> Self {
        Self {
            name: name.into(),
            robot,
            devices: Vec::new(),
            log: ProtocolLog::new(),
            delay,
            clock,
        }
    }

    /// Build a workcell from configuration
    ///
    /// Validates the configuration, registers devices in order and loads the
    /// initial plates.
    pub fn from_config(config: &WorkcellConfig, delay: D, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;

        let robot = RobotArm::new(config.robot.name.as_str())
            .with_speed(config.robot.speed_mm_s)
            .with_home(config.robot.home.to_position("Home"));
        let mut cell = Self::new(config.name.as_str(), robot, delay, clock);

        for device in &config.devices {
            cell.add_device(Device::new(device.name.as_str(), device.position()))?;
        }
        for placement in &config.plates {
            cell.place_initial_plate(&placement.device, PlateId::new(placement.id.as_str()))?;
        }

        info!(
            workcell = %cell.name,
            devices = cell.devices.len(),
            plates = config.plates.len(),
            "workcell ready"
        );
        Ok(cell)
    }

    /// Register a device
    ///
    /// Device names are unique keys.
    pub fn add_device(&mut self, device: Device) -> Result<(), ConfigError> {
        if self.devices.iter().any(|d| d.name() == device.name()) {
            return Err(ConfigError::DuplicateDevice(device.name().to_string()));
        }
        info!(device = device.name(), position = %device.position(), "added device");
        self.devices.push(device);
        Ok(())
    }

    /// Put a plate into a device before the run starts
    ///
    /// A plate id can only be held in one place: an id already held by a
    /// device or the robot is rejected.
    pub fn place_initial_plate(&mut self, device: &str, plate: PlateId) -> Result<(), ConfigError> {
        let in_device = self.devices.iter().any(|d| d.plate() == Some(&plate));
        if in_device || self.robot.plate() == Some(&plate) {
            return Err(ConfigError::DuplicatePlate {
                plate: plate.to_string(),
            });
        }

        let Some(dev) = self.devices.iter_mut().find(|d| d.name() == device) else {
            return Err(ConfigError::UnknownPlacementDevice {
                device: device.to_string(),
                plate: plate.to_string(),
            });
        };

        let id = plate.to_string();
        dev.load(plate)
            .map_err(|_| ConfigError::DevicePlacedTwice {
                device: device.to_string(),
                plate: id,
            })
    }

    /// Workcell name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The robot arm
    pub fn robot(&self) -> &RobotArm {
        &self.robot
    }

    /// Find a device by name
    pub fn device(&self, name: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.name() == name)
    }

    /// Devices in registration order
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter()
    }

    /// Transfer log
    pub fn log(&self) -> &ProtocolLog {
        &self.log
    }

    /// The delay used for pacing
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// The clock used for timestamps
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Move a plate from one device to another
    ///
    /// Exactly one log entry is appended per call: `Success`, or `Failed`
    /// with the error text. Failures are returned but never rolled back; a
    /// plate picked before a failed place stays in the gripper.
    pub fn transfer_plate(
        &mut self,
        plate: &PlateId,
        source: &str,
        dest: &str,
    ) -> Result<(), CellError> {
        info!(plate = %plate, from = source, to = dest, "transfer");

        let result = self.try_transfer(plate, source, dest);
        let timestamp = self.clock.now();

        match &result {
            Ok(()) => {
                info!(plate = %plate, from = source, to = dest, "transfer complete");
                self.log
                    .append(TransferLogEntry::success(timestamp, plate.clone(), source, dest));
            }
            Err(e) => {
                warn!(plate = %plate, from = source, to = dest, error = %e, "transfer failed");
                self.log.append(TransferLogEntry::failed(
                    timestamp,
                    plate.clone(),
                    source,
                    dest,
                    e,
                ));
            }
        }

        result
    }

    fn try_transfer(&mut self, plate: &PlateId, source: &str, dest: &str) -> Result<(), CellError> {
        let src = self.device_index(source)?;
        let dst = self.device_index(dest)?;

        self.robot
            .pick_plate(&mut self.devices[src], plate, &mut self.delay)?;
        self.robot
            .place_plate(&mut self.devices[dst], &mut self.delay)?;
        Ok(())
    }

    /// Run the named device's process on its plate
    ///
    /// Errors are returned to the caller and are not logged.
    pub fn process_device(&mut self, name: &str, duration_s: u16) -> Result<(), CellError> {
        let idx = self.device_index(name)?;
        self.devices[idx].process(duration_s, &mut self.delay)
    }

    /// Send the robot to its home position
    pub fn return_home(&mut self) -> Move {
        self.robot.return_home(&mut self.delay)
    }

    fn device_index(&self, name: &str) -> Result<usize, CellError> {
        self.devices
            .iter()
            .position(|d| d.name() == name)
            .ok_or_else(|| CellError::UnknownDevice {
                name: name.to_string(),
            })
    }
}
