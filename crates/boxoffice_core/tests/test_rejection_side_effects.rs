//! Tests proving rejected purchases leave no side effects.
//!
//! Every `InvalidPurchase` reason must reject before either
//! collaborator is invoked: zero payment calls, zero reservation
//! calls. Only observability counters may change.

use boxoffice_core::domain::TicketType;
use boxoffice_core::purchase::{
    InvalidPurchase, PurchaseError, PurchaseMetrics, purchase_rejected_total, purchase_tickets,
};

mod common;
use common::{CallLog, RecordingPayment, RecordingSeating, new_call_log, requests};

fn assert_rejects_with_no_calls(
    account_id: Option<i64>,
    entries: &[(TicketType, u32)],
    expected: InvalidPurchase,
) -> CallLog {
    let log = new_call_log();
    let mut payment = RecordingPayment::new(&log);
    let mut seating = RecordingSeating::new(&log);
    let mut metrics = PurchaseMetrics::new();

    let result = purchase_tickets(
        account_id,
        &requests(entries),
        &mut payment,
        &mut seating,
        &mut metrics,
    );

    assert_eq!(result, Err(PurchaseError::Invalid(expected)));
    assert!(
        log.borrow().is_empty(),
        "rejection for {expected:?} must not invoke any collaborator"
    );
    assert_eq!(metrics.approved_total(), 0);
    assert_eq!(metrics.rejected_total(), 1);
    log
}

// ─── Account rejections ─────────────────────────────────────────────────

#[test]
fn test_missing_account_id_no_side_effects() {
    assert_rejects_with_no_calls(
        None,
        &[(TicketType::Adult, 1)],
        InvalidPurchase::AccountIdMissing,
    );
}

#[test]
fn test_zero_account_id_no_side_effects() {
    assert_rejects_with_no_calls(
        Some(0),
        &[(TicketType::Adult, 1)],
        InvalidPurchase::AccountIdNotPositive { account_id: 0 },
    );
}

#[test]
fn test_negative_account_id_no_side_effects() {
    assert_rejects_with_no_calls(
        Some(-5),
        &[(TicketType::Adult, 1)],
        InvalidPurchase::AccountIdNotPositive { account_id: -5 },
    );
}

// ─── Quantity rejections ────────────────────────────────────────────────

#[test]
fn test_empty_request_list_no_side_effects() {
    assert_rejects_with_no_calls(Some(123), &[], InvalidPurchase::NoTicketsRequested);
}

#[test]
fn test_all_zero_quantities_no_side_effects() {
    assert_rejects_with_no_calls(
        Some(123),
        &[(TicketType::Adult, 0), (TicketType::Child, 0)],
        InvalidPurchase::NoTicketsRequested,
    );
}

#[test]
fn test_over_maximum_no_side_effects() {
    assert_rejects_with_no_calls(
        Some(123),
        &[(TicketType::Adult, 21)],
        InvalidPurchase::MaxTicketCountExceeded { requested: 21 },
    );
}

// ─── Adult presence rejections ──────────────────────────────────────────

#[test]
fn test_child_only_no_side_effects() {
    assert_rejects_with_no_calls(
        Some(123),
        &[(TicketType::Child, 2)],
        InvalidPurchase::NoAdultTicket,
    );
}

#[test]
fn test_infant_only_no_side_effects() {
    assert_rejects_with_no_calls(
        Some(123),
        &[(TicketType::Infant, 1)],
        InvalidPurchase::NoAdultTicket,
    );
}

// ─── Gate ordering on rejection ─────────────────────────────────────────

#[test]
fn test_account_gate_runs_before_quantity_gates() {
    // Invalid account AND empty requests: the account gate fires first.
    assert_rejects_with_no_calls(None, &[], InvalidPurchase::AccountIdMissing);
}

#[test]
fn test_limit_gate_runs_before_adult_gate() {
    // Child-only AND over the maximum: the limit gate fires first.
    assert_rejects_with_no_calls(
        Some(123),
        &[(TicketType::Child, 25)],
        InvalidPurchase::MaxTicketCountExceeded { requested: 25 },
    );
}

// ─── Process counter ────────────────────────────────────────────────────

#[test]
fn test_process_rejected_counter_increments() {
    let before = purchase_rejected_total();
    assert_rejects_with_no_calls(
        Some(123),
        &[(TicketType::Infant, 3)],
        InvalidPurchase::NoAdultTicket,
    );
    assert!(
        purchase_rejected_total() >= before + 1,
        "process-wide rejected counter must advance"
    );
}
