//! Account identifier gate.
//!
//! A purchase carries an optional integer account identifier. The gate
//! rejects when the identifier is absent or below 1; every integer >= 1
//! is accepted. Shape only — whether the account exists in a real
//! account store is out of scope.

use std::sync::atomic::{AtomicU64, Ordering};

// ─── Rejection reasons ──────────────────────────────────────────────────

/// Deterministic rejection reason from the account gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountGateRejectReason {
    /// No account identifier was supplied.
    AccountIdMissing,
    /// The supplied identifier is below the valid range (>= 1).
    AccountIdNotPositive,
}

// ─── Gate result ────────────────────────────────────────────────────────

/// Result of the account gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountGateResult {
    /// Identifier is well-formed — proceed.
    Allowed {
        /// The validated identifier.
        account_id: i64,
    },
    /// Identifier rejected — do NOT proceed.
    Rejected {
        /// Rejection reason.
        reason: AccountGateRejectReason,
    },
}

// ─── Metrics ────────────────────────────────────────────────────────────

/// Observability metrics for the account gate.
#[derive(Debug, Default)]
pub struct AccountGateMetrics {
    missing_total: u64,
    not_positive_total: u64,
    allowed_total: u64,
}

impl AccountGateMetrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rejection, incrementing the appropriate counter.
    pub fn record_reject(&mut self, reason: &AccountGateRejectReason) {
        match reason {
            AccountGateRejectReason::AccountIdMissing => self.missing_total += 1,
            AccountGateRejectReason::AccountIdNotPositive => self.not_positive_total += 1,
        }
    }

    /// Record an allowed evaluation.
    pub fn record_allowed(&mut self) {
        self.allowed_total += 1;
    }

    /// Total rejections across both reasons.
    pub fn reject_total(&self) -> u64 {
        self.missing_total + self.not_positive_total
    }

    /// Counter for missing-identifier rejections.
    pub fn missing_total(&self) -> u64 {
        self.missing_total
    }

    /// Counter for out-of-range-identifier rejections.
    pub fn not_positive_total(&self) -> u64 {
        self.not_positive_total
    }

    /// Total allowed evaluations.
    pub fn allowed_total(&self) -> u64 {
        self.allowed_total
    }
}

static ACCOUNT_MISSING_TOTAL: AtomicU64 = AtomicU64::new(0);
static ACCOUNT_NOT_POSITIVE_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Process-wide reject counter for the account gate.
pub fn account_gate_reject_total(reason: AccountGateRejectReason) -> u64 {
    match reason {
        AccountGateRejectReason::AccountIdMissing => ACCOUNT_MISSING_TOTAL.load(Ordering::Relaxed),
        AccountGateRejectReason::AccountIdNotPositive => {
            ACCOUNT_NOT_POSITIVE_TOTAL.load(Ordering::Relaxed)
        }
    }
}

fn bump_account_reject(reason: AccountGateRejectReason) {
    match reason {
        AccountGateRejectReason::AccountIdMissing => {
            ACCOUNT_MISSING_TOTAL.fetch_add(1, Ordering::Relaxed);
        }
        AccountGateRejectReason::AccountIdNotPositive => {
            ACCOUNT_NOT_POSITIVE_TOTAL.fetch_add(1, Ordering::Relaxed);
        }
    }
    let tail = format!("reason={reason:?}");
    super::emit_policy_metric_line("account_gate_reject_total", &tail);
}

// ─── Gate evaluator ─────────────────────────────────────────────────────

/// Evaluate the account identifier gate.
///
/// Valid range is all integers >= 1; `None`, zero, and negatives are
/// rejected.
pub fn evaluate_account_gate(
    account_id: Option<i64>,
    metrics: &mut AccountGateMetrics,
) -> AccountGateResult {
    let Some(account_id) = account_id else {
        let reason = AccountGateRejectReason::AccountIdMissing;
        metrics.record_reject(&reason);
        bump_account_reject(reason);
        return AccountGateResult::Rejected { reason };
    };

    if account_id < 1 {
        let reason = AccountGateRejectReason::AccountIdNotPositive;
        metrics.record_reject(&reason);
        bump_account_reject(reason);
        return AccountGateResult::Rejected { reason };
    }

    metrics.record_allowed();
    AccountGateResult::Allowed { account_id }
}
