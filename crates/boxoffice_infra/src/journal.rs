//! Append-only receipt journal.
//!
//! Every purchase side effect is captured as a JSON-line event:
//! payments taken and seats reserved. Appends go through a bounded
//! in-memory queue drained to disk by `flush()`; a full queue fails
//! closed rather than blocking or silently dropping. `replay` reads a
//! journal back and reduces it to running totals.

use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ─── Receipt events ─────────────────────────────────────────────────────

/// One journaled purchase side effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReceiptEvent {
    /// Payment taken for an approved purchase.
    PaymentTaken {
        account_id: i64,
        amount_units: u64,
        ts_ms: u64,
    },
    /// Seats reserved for an approved purchase.
    SeatsReserved {
        account_id: i64,
        seat_count: u32,
        ts_ms: u64,
    },
}

// ─── Append error ───────────────────────────────────────────────────────

/// Error returned when a journal append or flush fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalAppendError {
    /// Bounded append queue is full.
    QueueFull,
    /// Write or serialization failure.
    WriteFailed { reason: String },
}

impl std::fmt::Display for JournalAppendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QueueFull => write!(f, "receipt queue full"),
            Self::WriteFailed { reason } => write!(f, "receipt write failed: {reason}"),
        }
    }
}

impl std::error::Error for JournalAppendError {}

// ─── Metrics ────────────────────────────────────────────────────────────

/// Observability metrics for the receipt journal.
#[derive(Debug, Default)]
pub struct JournalMetrics {
    appends_total: u64,
    flushes_total: u64,
    queue_full_total: u64,
    write_errors_total: u64,
}

impl JournalMetrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total successful appends.
    pub fn appends_total(&self) -> u64 {
        self.appends_total
    }

    /// Total flushes to disk.
    pub fn flushes_total(&self) -> u64 {
        self.flushes_total
    }

    /// Appends rejected because the queue was full.
    pub fn queue_full_total(&self) -> u64 {
        self.queue_full_total
    }

    /// Flush attempts that hit a write error.
    pub fn write_errors_total(&self) -> u64 {
        self.write_errors_total
    }
}

// ─── Journal ────────────────────────────────────────────────────────────

/// Bounded-queue append-only receipt journal.
#[derive(Debug)]
pub struct ReceiptJournal {
    path: PathBuf,
    queue_max: usize,
    pending: VecDeque<ReceiptEvent>,
}

impl ReceiptJournal {
    /// Open a journal writing to `path` with the given queue bound.
    pub fn new(path: impl Into<PathBuf>, queue_max: usize) -> Self {
        Self {
            path: path.into(),
            queue_max,
            pending: VecDeque::new(),
        }
    }

    /// Journal file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of events queued but not yet flushed.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Enqueue one event. Fails closed with `QueueFull` when the bound
    /// is hit; the caller decides whether that aborts the purchase.
    pub fn append(
        &mut self,
        event: ReceiptEvent,
        metrics: &mut JournalMetrics,
    ) -> Result<(), JournalAppendError> {
        if self.pending.len() >= self.queue_max {
            metrics.queue_full_total += 1;
            return Err(JournalAppendError::QueueFull);
        }
        self.pending.push_back(event);
        metrics.appends_total += 1;
        Ok(())
    }

    /// Drain the queue to disk, one JSON line per event.
    pub fn flush(&mut self, metrics: &mut JournalMetrics) -> Result<(), JournalAppendError> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| {
                metrics.write_errors_total += 1;
                JournalAppendError::WriteFailed {
                    reason: err.to_string(),
                }
            })?;

        while let Some(event) = self.pending.front() {
            let line = serde_json::to_string(event).map_err(|err| {
                metrics.write_errors_total += 1;
                JournalAppendError::WriteFailed {
                    reason: err.to_string(),
                }
            })?;
            writeln!(file, "{line}").map_err(|err| {
                metrics.write_errors_total += 1;
                JournalAppendError::WriteFailed {
                    reason: err.to_string(),
                }
            })?;
            self.pending.pop_front();
        }

        metrics.flushes_total += 1;
        Ok(())
    }
}

// ─── Replay ─────────────────────────────────────────────────────────────

/// Outcome of replaying a receipt journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayOutcome {
    /// Sum of all payment amounts, whole currency units.
    pub payments_total_units: u64,
    /// Sum of all reserved seat counts.
    pub seats_total: u64,
    /// Every event, in journal order.
    pub events: Vec<ReceiptEvent>,
}

/// Read a journal file back and reduce it to running totals.
///
/// A missing file replays to an empty outcome; an unparseable line is
/// a corrupt journal and fails the replay.
pub fn replay(path: &Path) -> Result<ReplayOutcome, JournalAppendError> {
    let mut outcome = ReplayOutcome {
        payments_total_units: 0,
        seats_total: 0,
        events: Vec::new(),
    };

    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(outcome),
        Err(err) => {
            return Err(JournalAppendError::WriteFailed {
                reason: err.to_string(),
            });
        }
    };

    for line in BufReader::new(file).lines() {
        let line = line.map_err(|err| JournalAppendError::WriteFailed {
            reason: err.to_string(),
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let event: ReceiptEvent =
            serde_json::from_str(&line).map_err(|err| JournalAppendError::WriteFailed {
                reason: format!("corrupt journal line: {err}"),
            })?;
        match &event {
            ReceiptEvent::PaymentTaken { amount_units, .. } => {
                outcome.payments_total_units += *amount_units;
            }
            ReceiptEvent::SeatsReserved { seat_count, .. } => {
                outcome.seats_total += u64::from(*seat_count);
            }
        }
        outcome.events.push(event);
    }

    Ok(outcome)
}
