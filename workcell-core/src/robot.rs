//! Robot arm
//!
//! A single mobile agent that carries one plate at a time between devices.
//! There is no obstacle or kinematics model: a move always succeeds and
//! only its straight-line distance is reported.

use tracing::{info, warn};

use crate::device::Device;
use crate::error::CellError;
use crate::plate::PlateId;
use crate::position::SpatialPosition;
use crate::traits::Delay;

/// Default travel speed (mm/s)
pub const DEFAULT_SPEED_MM_S: f32 = 100.0;

/// Upper bound on the simulated dwell for a single move (ms)
pub const MAX_TRAVEL_DWELL_MS: u32 = 1000;

/// Gripper open/close dwell (ms)
pub const GRIP_DWELL_MS: u32 = 500;

/// Device handoff dwell (ms)
pub const HANDOFF_DWELL_MS: u32 = 300;

/// Nominal distance per move used for distance estimates (mm)
///
/// This is a fixed per-move figure, not the real path length.
pub const NOMINAL_MOVE_MM: u32 = 400;

/// Result of a single move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    /// Straight-line distance travelled (mm)
    pub distance_mm: f32,
    /// Travel time at the arm's speed (s)
    pub travel_s: f32,
}

impl Move {
    /// Dwell to simulate for this move, capped at [`MAX_TRAVEL_DWELL_MS`]
    pub fn dwell_ms(&self) -> u32 {
        let ms = (self.travel_s * 1000.0).round();
        if ms.is_finite() && ms > 0.0 {
            (ms as u32).min(MAX_TRAVEL_DWELL_MS)
        } else {
            0
        }
    }
}

/// Simulated plate-handling robot arm
#[derive(Debug, Clone, PartialEq)]
pub struct RobotArm {
    name: String,
    position: SpatialPosition,
    home: SpatialPosition,
    speed_mm_s: f32,
    plate: Option<PlateId>,
    move_count: u32,
}

impl RobotArm {
    /// Create an arm parked at the origin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: SpatialPosition::home(),
            home: SpatialPosition::home(),
            speed_mm_s: DEFAULT_SPEED_MM_S,
            plate: None,
            move_count: 0,
        }
    }

    /// Set the travel speed (mm/s)
    pub fn with_speed(mut self, speed_mm_s: f32) -> Self {
        self.speed_mm_s = speed_mm_s;
        self
    }

    /// Set the home position and park the arm there
    pub fn with_home(mut self, home: SpatialPosition) -> Self {
        self.position = home.clone();
        self.home = home;
        self
    }

    /// Arm name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current position
    pub fn position(&self) -> &SpatialPosition {
        &self.position
    }

    /// Home position
    pub fn home(&self) -> &SpatialPosition {
        &self.home
    }

    /// Travel speed (mm/s)
    pub fn speed_mm_s(&self) -> f32 {
        self.speed_mm_s
    }

    /// Plate in the gripper, if any
    pub fn plate(&self) -> Option<&PlateId> {
        self.plate.as_ref()
    }

    /// Number of moves made so far
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Estimated distance travelled so far (mm)
    ///
    /// `move_count × NOMINAL_MOVE_MM`, a fixed per-move figure.
    pub fn estimated_distance_mm(&self) -> u32 {
        self.move_count.saturating_mul(NOMINAL_MOVE_MM)
    }

    /// Move to a target position
    ///
    /// Always succeeds. Every call counts as exactly one move.
    pub fn move_to<D: Delay>(&mut self, target: &SpatialPosition, delay: &mut D) -> Move {
        let distance_mm = self.position.distance_to(target);
        let travel_s = if self.speed_mm_s > 0.0 {
            distance_mm / self.speed_mm_s
        } else {
            0.0
        };
        let step = Move {
            distance_mm,
            travel_s,
        };

        info!(
            robot = %self.name,
            from = %self.position,
            to = %target,
            distance_mm,
            travel_s,
            "moving"
        );
        delay.delay_ms(step.dwell_ms());

        self.position = target.clone();
        self.move_count += 1;
        step
    }

    /// Pick the plate held by `device`
    ///
    /// `expected` is the plate the caller believes is there; it is only used
    /// for diagnostics. The gripper takes whatever plate the device gives up.
    pub fn pick_plate<D: Delay>(
        &mut self,
        device: &mut Device,
        expected: &PlateId,
        delay: &mut D,
    ) -> Result<PlateId, CellError> {
        if let Some(held) = &self.plate {
            return Err(CellError::GripperOccupied {
                robot: self.name.clone(),
                plate: held.clone(),
            });
        }
        if !device.is_loaded() {
            return Err(CellError::EmptyDevice {
                device: device.name().to_string(),
            });
        }

        self.move_to(device.position(), delay);

        info!(robot = %self.name, plate = %expected, device = device.name(), "picking plate");
        delay.delay_ms(GRIP_DWELL_MS);

        let plate = device.unload()?;
        delay.delay_ms(HANDOFF_DWELL_MS);

        if plate != *expected {
            warn!(
                robot = %self.name,
                expected = %expected,
                actual = %plate,
                device = device.name(),
                "picked plate differs from expected"
            );
        }

        info!(robot = %self.name, plate = %plate, "plate secured in gripper");
        self.plate = Some(plate.clone());
        Ok(plate)
    }

    /// Place the held plate into `device`
    pub fn place_plate<D: Delay>(
        &mut self,
        device: &mut Device,
        delay: &mut D,
    ) -> Result<PlateId, CellError> {
        let Some(plate) = self.plate.clone() else {
            return Err(CellError::GripperEmpty {
                robot: self.name.clone(),
            });
        };
        if let Some(held) = device.plate() {
            return Err(CellError::AlreadyLoaded {
                device: device.name().to_string(),
                plate: held.clone(),
            });
        }

        self.move_to(device.position(), delay);

        info!(robot = %self.name, plate = %plate, device = device.name(), "placing plate");
        delay.delay_ms(GRIP_DWELL_MS);

        device.load(plate.clone())?;
        delay.delay_ms(HANDOFF_DWELL_MS);

        self.plate = None;
        info!(robot = %self.name, plate = %plate, "plate placed");
        Ok(plate)
    }

    /// Return to the home position
    pub fn return_home<D: Delay>(&mut self, delay: &mut D) -> Move {
        let home = self.home.clone();
        let step = self.move_to(&home, delay);
        info!(robot = %self.name, "returned to home position");
        step
    }
}
