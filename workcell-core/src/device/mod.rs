//! Processing devices
//!
//! A device is a fixed station that holds at most one plate. Plate custody
//! and the operational state change together, so the held plate is present
//! exactly when the state says a plate is held.

pub mod state;

pub use state::{DeviceEvent, DeviceState};

use tracing::{debug, info};

use crate::error::CellError;
use crate::plate::PlateId;
use crate::position::SpatialPosition;
use crate::traits::Delay;

/// A fixed-position processing station
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    name: String,
    position: SpatialPosition,
    state: DeviceState,
    plate: Option<PlateId>,
}

impl Device {
    /// Create an empty, idle device
    pub fn new(name: impl Into<String>, position: SpatialPosition) -> Self {
        Self {
            name: name.into(),
            position,
            state: DeviceState::Idle,
            plate: None,
        }
    }

    /// Device name (unique within a workcell)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fixed position the robot moves to for handoffs
    pub fn position(&self) -> &SpatialPosition {
        &self.position
    }

    /// Current operational state
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Plate currently held, if any
    pub fn plate(&self) -> Option<&PlateId> {
        self.plate.as_ref()
    }

    /// Check if the device holds a plate
    pub fn is_loaded(&self) -> bool {
        self.plate.is_some()
    }

    /// Accept a plate
    ///
    /// Fails with [`CellError::AlreadyLoaded`] if a plate is already held;
    /// the device is left untouched in that case.
    pub fn load(&mut self, plate: PlateId) -> Result<(), CellError> {
        if let Some(held) = &self.plate {
            return Err(CellError::AlreadyLoaded {
                device: self.name.clone(),
                plate: held.clone(),
            });
        }

        info!(device = %self.name, plate = %plate, "loading plate");
        self.plate = Some(plate);
        self.apply(DeviceEvent::Load);
        Ok(())
    }

    /// Give up the held plate
    ///
    /// Valid from Loaded, Processing or Complete. Returns the plate id.
    pub fn unload(&mut self) -> Result<PlateId, CellError> {
        let plate = self.plate.take().ok_or_else(|| CellError::EmptyDevice {
            device: self.name.clone(),
        })?;

        info!(device = %self.name, plate = %plate, "unloading plate");
        self.apply(DeviceEvent::Unload);
        Ok(plate)
    }

    /// Run a process on the held plate
    ///
    /// `duration_s` is an advisory dwell time passed to `delay`; it is not
    /// a correctness constraint.
    pub fn process<D: Delay>(&mut self, duration_s: u16, delay: &mut D) -> Result<(), CellError> {
        let Some(plate) = &self.plate else {
            return Err(CellError::EmptyDevice {
                device: self.name.clone(),
            });
        };

        info!(device = %self.name, plate = %plate, duration_s, "processing plate");
        self.apply(DeviceEvent::StartProcess);
        delay.delay_s(duration_s);
        self.apply(DeviceEvent::FinishProcess);
        info!(device = %self.name, "processing complete");
        Ok(())
    }

    fn apply(&mut self, event: DeviceEvent) {
        let next = self.state.transition(event);
        debug!(device = %self.name, from = %self.state, to = %next, ?event, "state transition");
        self.state = next;
    }
}
