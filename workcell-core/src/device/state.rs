//! Device state machine
//!
//! All devices share one generic state machine. The transition table is
//! explicit, finite, and deterministic; pairs not listed leave the state
//! unchanged.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Operational state of a processing device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeviceState {
    /// Empty and ready to accept a plate
    #[default]
    Idle,
    /// Holding a plate, not yet processed
    Loaded,
    /// Processing the held plate
    Processing,
    /// Processing finished; plate still held
    Complete,
}

/// Events that drive device state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    /// A plate was placed into the device
    Load,
    /// Processing started on the held plate
    StartProcess,
    /// Processing finished
    FinishProcess,
    /// The held plate was removed
    Unload,
}

impl DeviceState {
    /// Check if a device in this state holds a plate
    pub fn holds_plate(&self) -> bool {
        !matches!(self, DeviceState::Idle)
    }

    /// Lower-case name for reports
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceState::Idle => "idle",
            DeviceState::Loaded => "loaded",
            DeviceState::Processing => "processing",
            DeviceState::Complete => "complete",
        }
    }

    /// Process an event and return the next state
    pub fn transition(self, event: DeviceEvent) -> Self {
        use DeviceEvent::*;
        use DeviceState::*;

        match (self, event) {
            (Idle, Load) => Loaded,

            // A completed plate may be processed again without unloading
            (Loaded, StartProcess) | (Complete, StartProcess) => Processing,
            (Processing, FinishProcess) => Complete,

            // Processing does not block unload
            (Loaded, Unload) | (Processing, Unload) | (Complete, Unload) => Idle,

            _ => self,
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let state = DeviceState::Idle;
        let loaded = state.transition(DeviceEvent::Load);
        assert_eq!(loaded, DeviceState::Loaded);

        let processing = loaded.transition(DeviceEvent::StartProcess);
        assert_eq!(processing, DeviceState::Processing);

        let complete = processing.transition(DeviceEvent::FinishProcess);
        assert_eq!(complete, DeviceState::Complete);

        let idle = complete.transition(DeviceEvent::Unload);
        assert_eq!(idle, DeviceState::Idle);
    }

    #[test]
    fn test_unload_from_any_holding_state() {
        let states = [
            DeviceState::Loaded,
            DeviceState::Processing,
            DeviceState::Complete,
        ];

        for state in states {
            assert_eq!(state.transition(DeviceEvent::Unload), DeviceState::Idle);
        }
    }

    #[test]
    fn test_invalid_events_keep_state() {
        assert_eq!(
            DeviceState::Idle.transition(DeviceEvent::Unload),
            DeviceState::Idle
        );
        assert_eq!(
            DeviceState::Idle.transition(DeviceEvent::StartProcess),
            DeviceState::Idle
        );
        assert_eq!(
            DeviceState::Loaded.transition(DeviceEvent::Load),
            DeviceState::Loaded
        );
        assert_eq!(
            DeviceState::Loaded.transition(DeviceEvent::FinishProcess),
            DeviceState::Loaded
        );
    }

    #[test]
    fn test_reprocess_complete_plate() {
        let next = DeviceState::Complete.transition(DeviceEvent::StartProcess);
        assert_eq!(next, DeviceState::Processing);
    }

    #[test]
    fn test_holds_plate() {
        assert!(!DeviceState::Idle.holds_plate());
        assert!(DeviceState::Loaded.holds_plate());
        assert!(DeviceState::Processing.holds_plate());
        assert!(DeviceState::Complete.holds_plate());
    }
}
