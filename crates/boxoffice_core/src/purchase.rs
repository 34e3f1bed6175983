//! Purchase pipeline: validate, compute, then dispatch side effects.
//!
//! One entrypoint, [`purchase_tickets`], runs the gates in a fixed
//! order (account, aggregation, ticket limit, adult presence, cost,
//! seats) and only then invokes the two collaborators: payment first,
//! seat reservation second. Every rejection happens before either
//! collaborator is touched, so a failed purchase leaves no partial
//! side effects. Each call is a single-shot, stateless transaction.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{TicketCounts, TicketType, TicketTypeRequest, compute_total_cost};
use crate::policy::{
    AccountGateMetrics, AccountGateRejectReason, AccountGateResult, AdultGateMetrics,
    AdultGateRejectReason, AdultGateResult, MAX_TICKETS_PER_PURCHASE, TicketLimitInput,
    TicketLimitMetrics, TicketLimitRejectReason, TicketLimitResult, emit_policy_metric_line,
    evaluate_account_gate, evaluate_adult_presence, evaluate_ticket_limit,
};

// ─── Collaborator contracts ─────────────────────────────────────────────

/// Error raised by a collaborator the core calls but does not implement.
///
/// The pipeline carries this through unmodified — never caught, never
/// retried, never remapped to a policy violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaboratorError {
    /// Which collaborator failed ("payment" or "seat_reservation").
    pub service: &'static str,
    /// Implementation-supplied failure description.
    pub reason: String,
}

impl fmt::Display for CollaboratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} collaborator failed: {}", self.service, self.reason)
    }
}

impl std::error::Error for CollaboratorError {}

/// External payment-taking service.
///
/// Assumed synchronous; implementations are expected to succeed or to
/// raise an unrecoverable error.
pub trait TicketPaymentService {
    fn make_payment(&mut self, account_id: i64, amount_units: u64)
    -> Result<(), CollaboratorError>;
}

/// External seat-reservation service. Same assumptions as payment.
pub trait SeatReservationService {
    fn reserve_seat(&mut self, account_id: i64, seat_count: u32) -> Result<(), CollaboratorError>;
}

// ─── Errors ─────────────────────────────────────────────────────────────

/// Policy violation detected before any side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPurchase {
    /// No account identifier supplied.
    AccountIdMissing,
    /// Account identifier below the valid range (>= 1).
    AccountIdNotPositive { account_id: i64 },
    /// Aggregated total is zero.
    NoTicketsRequested,
    /// Aggregated total exceeds the per-purchase maximum.
    MaxTicketCountExceeded { requested: u32 },
    /// No adult ticket present in the aggregate.
    NoAdultTicket,
    /// A requested type has no price-table entry (defect, fail-closed).
    PriceTableMissingEntry { ticket_type: TicketType },
}

impl fmt::Display for InvalidPurchase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccountIdMissing => write!(f, "invalid purchase: account id missing"),
            Self::AccountIdNotPositive { account_id } => {
                write!(f, "invalid purchase: account id {account_id} must be >= 1")
            }
            Self::NoTicketsRequested => write!(f, "invalid purchase: no tickets requested"),
            Self::MaxTicketCountExceeded { requested } => write!(
                f,
                "invalid purchase: {requested} tickets exceeds maximum of {MAX_TICKETS_PER_PURCHASE}"
            ),
            Self::NoAdultTicket => {
                write!(f, "invalid purchase: at least one adult ticket required")
            }
            Self::PriceTableMissingEntry { ticket_type } => {
                write!(f, "invalid purchase: no price entry for {ticket_type:?}")
            }
        }
    }
}

impl std::error::Error for InvalidPurchase {}

/// Failure mode of the purchase pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    /// A policy gate rejected the request; no side effects occurred.
    Invalid(InvalidPurchase),
    /// A collaborator raised; carried through unmodified.
    Collaborator(CollaboratorError),
}

impl fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Collaborator(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PurchaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Collaborator(err) => Some(err),
        }
    }
}

impl From<InvalidPurchase> for PurchaseError {
    fn from(err: InvalidPurchase) -> Self {
        Self::Invalid(err)
    }
}

impl From<CollaboratorError> for PurchaseError {
    fn from(err: CollaboratorError) -> Self {
        Self::Collaborator(err)
    }
}

// ─── Approved purchase ──────────────────────────────────────────────────

/// Validated totals of an approved purchase, as dispatched to the
/// collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseTotals {
    /// The validated account identifier.
    pub account_id: i64,
    /// Total cost in whole currency units, as paid.
    pub total_cost_units: u64,
    /// Seats reserved (infants excluded).
    pub seats_reserved: u32,
}

// ─── Metrics ────────────────────────────────────────────────────────────

/// Aggregated metrics for the purchase pipeline.
#[derive(Debug, Default)]
pub struct PurchaseMetrics {
    pub account: AccountGateMetrics,
    pub ticket_limit: TicketLimitMetrics,
    pub adult: AdultGateMetrics,
    approved_total: u64,
    rejected_total: u64,
}

impl PurchaseMetrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Purchases that passed every gate and dispatched both calls.
    pub fn approved_total(&self) -> u64 {
        self.approved_total
    }

    /// Purchases rejected by any gate.
    pub fn rejected_total(&self) -> u64 {
        self.rejected_total
    }

    fn record_approved(&mut self) {
        self.approved_total += 1;
    }

    fn record_rejected(&mut self) {
        self.rejected_total += 1;
    }
}

static PURCHASE_APPROVED_TOTAL: AtomicU64 = AtomicU64::new(0);
static PURCHASE_REJECTED_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Process-wide count of approved purchases.
pub fn purchase_approved_total() -> u64 {
    PURCHASE_APPROVED_TOTAL.load(Ordering::Relaxed)
}

/// Process-wide count of rejected purchases.
pub fn purchase_rejected_total() -> u64 {
    PURCHASE_REJECTED_TOTAL.load(Ordering::Relaxed)
}

fn reject(metrics: &mut PurchaseMetrics, reason: InvalidPurchase) -> PurchaseError {
    metrics.record_rejected();
    PURCHASE_REJECTED_TOTAL.fetch_add(1, Ordering::Relaxed);
    let tail = format!("reason={reason:?}");
    emit_policy_metric_line("purchase_rejected_total", &tail);
    tracing::debug!("PurchaseRejected reason={reason:?}");
    PurchaseError::Invalid(reason)
}

// ─── Pipeline ───────────────────────────────────────────────────────────

/// Validate a ticket purchase and dispatch payment and seat reservation.
///
/// Processing order: account gate, aggregation, ticket limit gate,
/// adult presence gate, cost computation, seat computation, then
/// payment strictly before seat reservation. Returns the validated
/// totals on success; on `PurchaseError::Invalid` neither collaborator
/// was invoked.
pub fn purchase_tickets(
    account_id: Option<i64>,
    requests: &[TicketTypeRequest],
    payment: &mut dyn TicketPaymentService,
    seating: &mut dyn SeatReservationService,
    metrics: &mut PurchaseMetrics,
) -> Result<PurchaseTotals, PurchaseError> {
    let account_id = match evaluate_account_gate(account_id, &mut metrics.account) {
        AccountGateResult::Allowed { account_id } => account_id,
        AccountGateResult::Rejected { reason } => {
            let reason = match reason {
                AccountGateRejectReason::AccountIdMissing => InvalidPurchase::AccountIdMissing,
                AccountGateRejectReason::AccountIdNotPositive => {
                    InvalidPurchase::AccountIdNotPositive {
                        account_id: account_id.unwrap_or(0),
                    }
                }
            };
            return Err(reject(metrics, reason));
        }
    };

    let counts = TicketCounts::from_requests(requests);

    let limit_input = TicketLimitInput {
        total_requested: counts.total(),
        max_tickets_per_purchase: MAX_TICKETS_PER_PURCHASE,
    };
    if let TicketLimitResult::Rejected {
        reason,
        total_requested,
    } = evaluate_ticket_limit(&limit_input, &mut metrics.ticket_limit)
    {
        let reason = match reason {
            TicketLimitRejectReason::NoTicketsRequested => InvalidPurchase::NoTicketsRequested,
            TicketLimitRejectReason::MaxTicketCountExceeded => {
                InvalidPurchase::MaxTicketCountExceeded {
                    requested: total_requested,
                }
            }
        };
        return Err(reject(metrics, reason));
    }

    if let AdultGateResult::Rejected { reason } =
        evaluate_adult_presence(&counts, &mut metrics.adult)
    {
        let AdultGateRejectReason::NoAdultTicket = reason;
        return Err(reject(metrics, InvalidPurchase::NoAdultTicket));
    }

    let total_cost_units = compute_total_cost(&counts).map_err(|ticket_type| {
        reject(metrics, InvalidPurchase::PriceTableMissingEntry { ticket_type })
    })?;

    let seats_reserved = counts.seats_required();

    // All gates passed. Side effects start here: payment strictly
    // before seat reservation. Collaborator failures propagate as-is.
    payment.make_payment(account_id, total_cost_units)?;
    seating.reserve_seat(account_id, seats_reserved)?;

    metrics.record_approved();
    PURCHASE_APPROVED_TOTAL.fetch_add(1, Ordering::Relaxed);
    let tail = format!(
        "account_id={account_id} cost_units={total_cost_units} seats={seats_reserved}"
    );
    emit_policy_metric_line("purchase_approved_total", &tail);
    tracing::debug!(
        "PurchaseApproved account_id={} cost_units={} seats={}",
        account_id,
        total_cost_units,
        seats_reserved
    );

    Ok(PurchaseTotals {
        account_id,
        total_cost_units,
        seats_reserved,
    })
}
