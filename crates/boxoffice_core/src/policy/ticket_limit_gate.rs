//! Total ticket count gate.
//!
//! The aggregated total across all types must be at least 1 and at
//! most the purchase maximum. A zero total (empty request sequence, or
//! every entry with quantity 0) rejects the same way an oversized one
//! does: before any side effect.

use std::sync::atomic::{AtomicU64, Ordering};

// ─── Rejection reasons ──────────────────────────────────────────────────

/// Deterministic rejection reason from the ticket limit gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketLimitRejectReason {
    /// Aggregated total is zero.
    NoTicketsRequested,
    /// Aggregated total exceeds the per-purchase maximum.
    MaxTicketCountExceeded,
}

// ─── Gate input ─────────────────────────────────────────────────────────

/// Input to the ticket limit gate.
///
/// The maximum travels in the input rather than being read at the rule
/// site, so the gate evaluates against exactly the threshold the
/// pipeline resolved.
#[derive(Debug, Clone, Copy)]
pub struct TicketLimitInput {
    /// Aggregated total across all ticket types.
    pub total_requested: u32,
    /// Maximum total tickets allowed in one purchase.
    pub max_tickets_per_purchase: u32,
}

// ─── Gate result ────────────────────────────────────────────────────────

/// Result of the ticket limit gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketLimitResult {
    /// Total is within [1, max] — proceed.
    Allowed {
        /// The validated total.
        total_requested: u32,
    },
    /// Total rejected — do NOT proceed.
    Rejected {
        /// Rejection reason.
        reason: TicketLimitRejectReason,
        /// The offending total.
        total_requested: u32,
    },
}

// ─── Metrics ────────────────────────────────────────────────────────────

/// Observability metrics for the ticket limit gate.
#[derive(Debug, Default)]
pub struct TicketLimitMetrics {
    none_requested_total: u64,
    max_exceeded_total: u64,
    allowed_total: u64,
}

impl TicketLimitMetrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rejection, incrementing the appropriate counter.
    pub fn record_reject(&mut self, reason: &TicketLimitRejectReason) {
        match reason {
            TicketLimitRejectReason::NoTicketsRequested => self.none_requested_total += 1,
            TicketLimitRejectReason::MaxTicketCountExceeded => self.max_exceeded_total += 1,
        }
    }

    /// Record an allowed evaluation.
    pub fn record_allowed(&mut self) {
        self.allowed_total += 1;
    }

    /// Total rejections across both reasons.
    pub fn reject_total(&self) -> u64 {
        self.none_requested_total + self.max_exceeded_total
    }

    /// Counter for zero-total rejections.
    pub fn none_requested_total(&self) -> u64 {
        self.none_requested_total
    }

    /// Counter for over-maximum rejections.
    pub fn max_exceeded_total(&self) -> u64 {
        self.max_exceeded_total
    }

    /// Total allowed evaluations.
    pub fn allowed_total(&self) -> u64 {
        self.allowed_total
    }
}

static LIMIT_NONE_REQUESTED_TOTAL: AtomicU64 = AtomicU64::new(0);
static LIMIT_MAX_EXCEEDED_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Process-wide reject counter for the ticket limit gate.
pub fn ticket_limit_reject_total(reason: TicketLimitRejectReason) -> u64 {
    match reason {
        TicketLimitRejectReason::NoTicketsRequested => {
            LIMIT_NONE_REQUESTED_TOTAL.load(Ordering::Relaxed)
        }
        TicketLimitRejectReason::MaxTicketCountExceeded => {
            LIMIT_MAX_EXCEEDED_TOTAL.load(Ordering::Relaxed)
        }
    }
}

fn bump_ticket_limit_reject(reason: TicketLimitRejectReason, total_requested: u32) {
    match reason {
        TicketLimitRejectReason::NoTicketsRequested => {
            LIMIT_NONE_REQUESTED_TOTAL.fetch_add(1, Ordering::Relaxed);
        }
        TicketLimitRejectReason::MaxTicketCountExceeded => {
            LIMIT_MAX_EXCEEDED_TOTAL.fetch_add(1, Ordering::Relaxed);
        }
    }
    let tail = format!("reason={reason:?} total={total_requested}");
    super::emit_policy_metric_line("ticket_limit_reject_total", &tail);
}

// ─── Gate evaluator ─────────────────────────────────────────────────────

/// Evaluate the aggregated total against the per-purchase bounds.
pub fn evaluate_ticket_limit(
    input: &TicketLimitInput,
    metrics: &mut TicketLimitMetrics,
) -> TicketLimitResult {
    if input.total_requested == 0 {
        let reason = TicketLimitRejectReason::NoTicketsRequested;
        metrics.record_reject(&reason);
        bump_ticket_limit_reject(reason, input.total_requested);
        return TicketLimitResult::Rejected {
            reason,
            total_requested: input.total_requested,
        };
    }

    if input.total_requested > input.max_tickets_per_purchase {
        let reason = TicketLimitRejectReason::MaxTicketCountExceeded;
        metrics.record_reject(&reason);
        bump_ticket_limit_reject(reason, input.total_requested);
        return TicketLimitResult::Rejected {
            reason,
            total_requested: input.total_requested,
        };
    }

    metrics.record_allowed();
    TicketLimitResult::Allowed {
        total_requested: input.total_requested,
    }
}
