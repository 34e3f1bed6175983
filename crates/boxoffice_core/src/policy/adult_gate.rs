//! Adult presence gate.
//!
//! Every valid purchase carries at least one adult ticket. The check
//! runs on the aggregated adult count, so child/infant-only requests
//! reject regardless of how the entries were split or ordered.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{TicketCounts, TicketType};

// ─── Rejection reasons ──────────────────────────────────────────────────

/// Deterministic rejection reason from the adult presence gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdultGateRejectReason {
    /// No adult ticket present in the aggregate.
    NoAdultTicket,
}

// ─── Gate result ────────────────────────────────────────────────────────

/// Result of the adult presence gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdultGateResult {
    /// At least one adult ticket — proceed.
    Allowed {
        /// Aggregated adult count.
        adult_count: u32,
    },
    /// No adult ticket — do NOT proceed.
    Rejected {
        /// Rejection reason.
        reason: AdultGateRejectReason,
    },
}

// ─── Metrics ────────────────────────────────────────────────────────────

/// Observability metrics for the adult presence gate.
#[derive(Debug, Default)]
pub struct AdultGateMetrics {
    reject_total: u64,
    allowed_total: u64,
}

impl AdultGateMetrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rejection.
    pub fn record_reject(&mut self) {
        self.reject_total += 1;
    }

    /// Record an allowed evaluation.
    pub fn record_allowed(&mut self) {
        self.allowed_total += 1;
    }

    /// Total rejections.
    pub fn reject_total(&self) -> u64 {
        self.reject_total
    }

    /// Total allowed evaluations.
    pub fn allowed_total(&self) -> u64 {
        self.allowed_total
    }
}

static ADULT_GATE_REJECT_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Process-wide reject counter for the adult presence gate.
pub fn adult_gate_reject_total() -> u64 {
    ADULT_GATE_REJECT_TOTAL.load(Ordering::Relaxed)
}

fn bump_adult_gate_reject() {
    ADULT_GATE_REJECT_TOTAL.fetch_add(1, Ordering::Relaxed);
    let reason = AdultGateRejectReason::NoAdultTicket;
    let tail = format!("reason={reason:?}");
    super::emit_policy_metric_line("adult_gate_reject_total", &tail);
}

// ─── Gate evaluator ─────────────────────────────────────────────────────

/// Evaluate the adult presence requirement on aggregated counts.
pub fn evaluate_adult_presence(
    counts: &TicketCounts,
    metrics: &mut AdultGateMetrics,
) -> AdultGateResult {
    let adult_count = counts.count(TicketType::Adult);
    if adult_count < 1 {
        metrics.record_reject();
        bump_adult_gate_reject();
        return AdultGateResult::Rejected {
            reason: AdultGateRejectReason::NoAdultTicket,
        };
    }

    metrics.record_allowed();
    AdultGateResult::Allowed { adult_count }
}
