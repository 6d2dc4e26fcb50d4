//! Protocol log
//!
//! Append-only record of every transfer attempt. Insertion order is the log
//! order; entries are never edited once appended.

use core::fmt;

use chrono::NaiveDateTime;

use crate::error::CellError;
use crate::plate::PlateId;

/// Outcome of a single transfer attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Success,
    Failed,
}

impl TransferOutcome {
    /// Lower-case name for reports
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferOutcome::Success => "success",
            TransferOutcome::Failed => "failed",
        }
    }
}

impl fmt::Display for TransferOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transfer attempt
#[derive(Debug, Clone, PartialEq)]
pub struct TransferLogEntry {
    /// When the attempt finished
    pub timestamp: NaiveDateTime,
    /// Plate the caller asked to move
    pub plate: PlateId,
    /// Source device name
    pub source: String,
    /// Destination device name
    pub destination: String,
    /// Success or failure
    pub outcome: TransferOutcome,
    /// Diagnostic for failed attempts
    pub error: Option<String>,
}

impl TransferLogEntry {
    /// Entry for a completed transfer
    pub fn success(
        timestamp: NaiveDateTime,
        plate: PlateId,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            plate,
            source: source.into(),
            destination: destination.into(),
            outcome: TransferOutcome::Success,
            error: None,
        }
    }

    /// Entry for a failed transfer
    pub fn failed(
        timestamp: NaiveDateTime,
        plate: PlateId,
        source: impl Into<String>,
        destination: impl Into<String>,
        error: &CellError,
    ) -> Self {
        Self {
            timestamp,
            plate,
            source: source.into(),
            destination: destination.into(),
            outcome: TransferOutcome::Failed,
            error: Some(error.to_string()),
        }
    }

    /// Check if the transfer succeeded
    pub fn is_success(&self) -> bool {
        self.outcome == TransferOutcome::Success
    }
}

/// Counts derived from the log at report time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogSummary {
    /// Total transfer attempts
    pub total: usize,
    /// Successful transfers
    pub succeeded: usize,
    /// Failed transfers
    pub failed: usize,
}

impl LogSummary {
    /// Success rate as a percentage (0 when the log is empty)
    pub fn success_rate_pct(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.succeeded as f64 / self.total as f64 * 100.0
    }
}

/// Ordered, append-only transfer log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProtocolLog {
    entries: Vec<TransferLogEntry>,
}

impl ProtocolLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    ///
    /// Only the workcell appends; everyone else reads.
    pub(crate) fn append(&mut self, entry: TransferLogEntry) {
        self.entries.push(entry);
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[TransferLogEntry] {
        &self.entries
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &TransferLogEntry> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been logged
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&TransferLogEntry> {
        self.entries.last()
    }

    /// Derive totals and success rate
    pub fn summary(&self) -> LogSummary {
        let total = self.entries.len();
        let succeeded = self.entries.iter().filter(|e| e.is_success()).count();
        LogSummary {
            total,
            succeeded,
            failed: total - succeeded,
        }
    }
}
