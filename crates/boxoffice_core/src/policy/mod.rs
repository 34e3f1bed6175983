//! Purchase policy gates.
//!
//! Each rule lives in its own gate module with the same shape: an
//! input, a reject-reason enum, an `Allowed`/`Rejected` result, and a
//! per-gate metrics tracker. Gates never perform side effects; the
//! purchase pipeline consults them in a fixed order and stops at the
//! first rejection.

use std::sync::Mutex;

pub mod account_gate;
pub mod adult_gate;
pub mod ticket_limit_gate;

pub use account_gate::{
    AccountGateMetrics, AccountGateRejectReason, AccountGateResult, account_gate_reject_total,
    evaluate_account_gate,
};
pub use adult_gate::{
    AdultGateMetrics, AdultGateRejectReason, AdultGateResult, adult_gate_reject_total,
    evaluate_adult_presence,
};
pub use ticket_limit_gate::{
    TicketLimitInput, TicketLimitMetrics, TicketLimitRejectReason, TicketLimitResult,
    evaluate_ticket_limit, ticket_limit_reject_total,
};

/// Maximum total tickets across all types in a single purchase.
pub const MAX_TICKETS_PER_PURCHASE: u32 = 20;

static POLICY_METRIC_LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Append a structured `name key=value` metric line to the process
/// buffer. Lines accumulate until drained via
/// [`take_policy_metric_lines`].
pub(crate) fn emit_policy_metric_line(name: &str, tail: &str) {
    let line = if tail.is_empty() {
        name.to_string()
    } else {
        format!("{name} {tail}")
    };
    tracing::debug!("{line}");
    if let Ok(mut lines) = POLICY_METRIC_LINES.lock() {
        lines.push(line);
    }
}

/// Drain and return all buffered policy metric lines.
pub fn take_policy_metric_lines() -> Vec<String> {
    match POLICY_METRIC_LINES.lock() {
        Ok(mut lines) => std::mem::take(&mut *lines),
        Err(_) => Vec::new(),
    }
}
