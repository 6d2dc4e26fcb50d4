//! Protocol steps

use core::fmt;

use crate::config::{ProtocolConfig, StepConfig};
use crate::plate::PlateId;

/// What a step does
#[derive(Debug, Clone, PartialEq)]
pub enum StepAction {
    /// Move a plate from one device to another
    Transfer {
        plate: PlateId,
        from: String,
        to: String,
    },
    /// Run a device's process on its plate
    Process { device: String, duration_s: u16 },
    /// Send the robot to its home position
    ReturnHome,
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepAction::Transfer { plate, from, to } => {
                write!(f, "transfer {plate}: {from} -> {to}")
            }
            StepAction::Process { device, duration_s } => {
                write!(f, "process on {device} ({duration_s}s)")
            }
            StepAction::ReturnHome => f.write_str("return home"),
        }
    }
}

/// A titled step
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolStep {
    /// Human-readable title
    pub title: String,
    /// Action to perform
    pub action: StepAction,
}

/// Ordered sequence of steps
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Protocol {
    /// Display label
    pub label: String,
    /// Steps in execution order
    pub steps: Vec<ProtocolStep>,
}

impl Protocol {
    /// Create an empty protocol
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            steps: Vec::new(),
        }
    }

    /// Append a transfer step
    pub fn transfer(
        mut self,
        title: impl Into<String>,
        plate: impl Into<PlateId>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.steps.push(ProtocolStep {
            title: title.into(),
            action: StepAction::Transfer {
                plate: plate.into(),
                from: from.into(),
                to: to.into(),
            },
        });
        self
    }

    /// Append a process step
    pub fn process(
        mut self,
        title: impl Into<String>,
        device: impl Into<String>,
        duration_s: u16,
    ) -> Self {
        self.steps.push(ProtocolStep {
            title: title.into(),
            action: StepAction::Process {
                device: device.into(),
                duration_s,
            },
        });
        self
    }

    /// Append a return-home step
    pub fn return_home(mut self, title: impl Into<String>) -> Self {
        self.steps.push(ProtocolStep {
            title: title.into(),
            action: StepAction::ReturnHome,
        });
        self
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the protocol has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl From<&ProtocolConfig> for Protocol {
    fn from(config: &ProtocolConfig) -> Self {
        let steps = config
            .steps
            .iter()
            .map(|step| match step {
                StepConfig::Transfer {
                    title,
                    plate,
                    from,
                    to,
                } => ProtocolStep {
                    title: title.clone(),
                    action: StepAction::Transfer {
                        plate: PlateId::new(plate.as_str()),
                        from: from.clone(),
                        to: to.clone(),
                    },
                },
                StepConfig::Process {
                    title,
                    device,
                    duration_s,
                } => ProtocolStep {
                    title: title.clone(),
                    action: StepAction::Process {
                        device: device.clone(),
                        duration_s: *duration_s,
                    },
                },
                StepConfig::ReturnHome { title } => ProtocolStep {
                    title: title.clone(),
                    action: StepAction::ReturnHome,
                },
            })
            .collect();

        Self {
            label: config.label.clone(),
            steps,
        }
    }
}
