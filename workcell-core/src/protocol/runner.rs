//! Protocol execution
//!
//! Runs protocol steps in order against a workcell. Failures are handled
//! per step kind:
//!
//! - A failed transfer is already logged by the workcell; the runner records
//!   it and moves on to the next step.
//! - A failed process step aborts the run. Remaining steps are skipped and
//!   the error is returned, with the log left as the partial record.

use chrono::{NaiveDateTime, TimeDelta};
use thiserror::Error;
use tracing::{error, info, warn};

use super::step::{Protocol, StepAction};
use crate::error::CellError;
use crate::log::LogSummary;
use crate::traits::{Clock, Delay};
use crate::workcell::Workcell;

/// Errors that stop a protocol run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProtocolError {
    /// A step failed in a way the run cannot continue from
    #[error("step {number} ({title}) failed: {source}")]
    Aborted {
        /// 1-based step number
        number: usize,
        title: String,
        #[source]
        source: CellError,
    },

    /// Cancellation was requested before a step started
    #[error("protocol cancelled before step {number}")]
    Cancelled {
        /// 1-based step number that did not run
        number: usize,
    },
}

/// How a step ended
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Transfer succeeded
    Transferred,
    /// Transfer failed and was logged; the run continued
    TransferFailed(CellError),
    /// Device process completed
    Processed,
    /// Robot reached home
    Homed,
}

/// Record of one executed step
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    /// 1-based step number
    pub number: usize,
    /// Step title
    pub title: String,
    /// What happened
    pub outcome: StepOutcome,
}

/// Result of a completed protocol run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Protocol label
    pub protocol: String,
    /// Run start
    pub started: NaiveDateTime,
    /// Run end
    pub finished: NaiveDateTime,
    /// Every step, in order
    pub steps: Vec<StepRecord>,
    /// Robot moves so far
    pub moves: u32,
    /// Nominal distance estimate (mm)
    pub estimated_distance_mm: u32,
    /// Transfer log totals
    pub summary: LogSummary,
}

impl RunReport {
    /// Wall-clock duration of the run
    pub fn duration(&self) -> TimeDelta {
        self.finished - self.started
    }

    /// Number of transfer steps that failed
    pub fn failed_transfers(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, StepOutcome::TransferFailed(_)))
            .count()
    }
}

impl<D: Delay, C: Clock> Workcell<D, C> {
    /// Run every step of `protocol`
    pub fn run_protocol(&mut self, protocol: &Protocol) -> Result<RunReport, ProtocolError> {
        self.run_protocol_until(protocol, || false)
    }

    /// Run `protocol`, polling `abort` before each step
    ///
    /// When `abort` returns true the run stops with
    /// [`ProtocolError::Cancelled`] and the remaining steps are skipped.
    pub fn run_protocol_until<F>(
        &mut self,
        protocol: &Protocol,
        mut abort: F,
    ) -> Result<RunReport, ProtocolError>
    where
        F: FnMut() -> bool,
    {
        let started = self.clock().now();
        info!(
            protocol = %protocol.label,
            workcell = self.name(),
            steps = protocol.len(),
            "protocol started"
        );

        let mut steps = Vec::with_capacity(protocol.len());

        for (index, step) in protocol.steps.iter().enumerate() {
            let number = index + 1;

            if abort() {
                warn!(number, "protocol cancelled");
                return Err(ProtocolError::Cancelled { number });
            }

            info!(number, title = %step.title, action = %step.action, "step");

            let outcome = match &step.action {
                StepAction::Transfer { plate, from, to } => {
                    match self.transfer_plate(plate, from, to) {
                        Ok(()) => StepOutcome::Transferred,
                        Err(e) => StepOutcome::TransferFailed(e),
                    }
                }
                StepAction::Process { device, duration_s } => {
                    if let Err(source) = self.process_device(device, *duration_s) {
                        error!(number, title = %step.title, error = %source, "protocol aborted");
                        return Err(ProtocolError::Aborted {
                            number,
                            title: step.title.clone(),
                            source,
                        });
                    }
                    StepOutcome::Processed
                }
                StepAction::ReturnHome => {
                    self.return_home();
                    StepOutcome::Homed
                }
            };

            steps.push(StepRecord {
                number,
                title: step.title.clone(),
                outcome,
            });
        }

        let finished = self.clock().now();
        let report = RunReport {
            protocol: protocol.label.clone(),
            started,
            finished,
            steps,
            moves: self.robot().move_count(),
            estimated_distance_mm: self.robot().estimated_distance_mm(),
            summary: self.log().summary(),
        };

        info!(
            protocol = %protocol.label,
            moves = report.moves,
            transfers = report.summary.total,
            failed = report.summary.failed,
            "protocol complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlacementConfig, WorkcellConfig, REFERENCE_PLATE};
    use crate::plate::PlateId;
    use crate::position::SpatialPosition;
    use crate::testing::{FixedClock, NoDelay};
    use crate::{DeviceState, TransferOutcome};

    fn reference_cell() -> Workcell<NoDelay, FixedClock> {
        Workcell::from_config(
            &WorkcellConfig::reference(),
            NoDelay::default(),
            FixedClock::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_screening_protocol_round_trip() {
        let mut cell = reference_cell();
        let report = cell
            .run_protocol(&Protocol::cell_screening(REFERENCE_PLATE))
            .unwrap();

        assert_eq!(report.steps.len(), 10);
        assert_eq!(report.summary.total, 5);
        assert_eq!(report.summary.succeeded, 5);
        assert_eq!(report.failed_transfers(), 0);
        // Two moves per transfer plus the final homing move
        assert_eq!(report.moves, 11);
        assert_eq!(report.estimated_distance_mm, 4400);

        let storage = cell.device("Storage").unwrap();
        assert_eq!(storage.plate(), Some(&PlateId::new(REFERENCE_PLATE)));
        assert_eq!(storage.state(), DeviceState::Loaded);
        assert_eq!(
            cell.device("PlateReader").unwrap().state(),
            DeviceState::Idle
        );
        assert!(cell.robot().plate().is_none());
        assert_eq!(cell.robot().position(), &SpatialPosition::home());
    }

    #[test]
    fn test_transfer_failure_does_not_stop_run() {
        let mut cell = reference_cell();
        let protocol = Protocol::new("Tolerant")
            .transfer("Wrong source", "P1", "Centrifuge", "PlateReader")
            .transfer("Fetch", REFERENCE_PLATE, "Storage", "PlateReader")
            .return_home("Park");

        let report = cell.run_protocol(&protocol).unwrap();

        assert_eq!(report.steps.len(), 3);
        assert!(matches!(
            report.steps[0].outcome,
            StepOutcome::TransferFailed(CellError::EmptyDevice { .. })
        ));
        assert_eq!(report.steps[1].outcome, StepOutcome::Transferred);
        assert_eq!(report.steps[2].outcome, StepOutcome::Homed);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(format!("{:.1}", report.summary.success_rate_pct()), "50.0");
    }

    #[test]
    fn test_process_failure_aborts_run() {
        let mut cell = reference_cell();
        let protocol = Protocol::new("Fragile")
            .transfer("Fetch", REFERENCE_PLATE, "Storage", "LiquidHandler")
            .process("Spin empty centrifuge", "Centrifuge", 2)
            .transfer("Never runs", REFERENCE_PLATE, "LiquidHandler", "Storage")
            .return_home("Never runs");

        let err = cell.run_protocol(&protocol).unwrap_err();

        assert_eq!(
            err,
            ProtocolError::Aborted {
                number: 2,
                title: "Spin empty centrifuge".into(),
                source: CellError::EmptyDevice {
                    device: "Centrifuge".into()
                },
            }
        );
        // Only the first transfer made it into the log
        assert_eq!(cell.log().len(), 1);
        assert_eq!(cell.log().entries()[0].outcome, TransferOutcome::Success);
        assert_eq!(cell.robot().move_count(), 2);
        assert_eq!(
            cell.device("LiquidHandler").unwrap().plate(),
            Some(&PlateId::new(REFERENCE_PLATE))
        );
    }

    #[test]
    fn test_failed_transfer_then_process_aborts() {
        // The failing first transfer leaves LiquidHandler empty, so the
        // following process step is fatal.
        let mut config = WorkcellConfig::reference();
        config.plates = vec![PlacementConfig {
            device: "PlateReader".into(),
            id: REFERENCE_PLATE.into(),
        }];
        let mut cell = Workcell::from_config(&config, NoDelay::default(), FixedClock::default())
            .unwrap();

        let err = cell
            .run_protocol(&Protocol::cell_screening(REFERENCE_PLATE))
            .unwrap_err();

        assert!(matches!(err, ProtocolError::Aborted { number: 2, .. }));
        assert_eq!(cell.log().len(), 1);
        assert_eq!(cell.log().summary().failed, 1);
    }

    #[test]
    fn test_unknown_process_device_aborts() {
        let mut cell = reference_cell();
        let protocol = Protocol::new("Typo").process("Shake", "Shaker", 1);

        let err = cell.run_protocol(&protocol).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Aborted {
                source: CellError::UnknownDevice { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_cancel_between_steps() {
        let mut cell = reference_cell();
        let mut polls = 0;
        let err = cell
            .run_protocol_until(&Protocol::cell_screening(REFERENCE_PLATE), || {
                polls += 1;
                polls > 2
            })
            .unwrap_err();

        assert_eq!(err, ProtocolError::Cancelled { number: 3 });
        // Steps 1 (transfer) and 2 (process) ran
        assert_eq!(cell.log().len(), 1);
        assert_eq!(
            cell.device("LiquidHandler").unwrap().state(),
            DeviceState::Complete
        );
    }

    #[test]
    fn test_empty_protocol() {
        let mut cell = reference_cell();
        let report = cell.run_protocol(&Protocol::new("Nothing")).unwrap();
        assert!(report.steps.is_empty());
        assert_eq!(report.summary.success_rate_pct(), 0.0);
        assert_eq!(report.duration(), TimeDelta::zero());
    }
}
