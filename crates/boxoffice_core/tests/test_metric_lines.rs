//! Tests for structured policy metric lines.
//!
//! The metric-line buffer is process-global, so this binary holds a
//! single test that drains it around a known sequence of purchases.

use boxoffice_core::domain::TicketType;
use boxoffice_core::policy::take_policy_metric_lines;
use boxoffice_core::purchase::{PurchaseMetrics, purchase_tickets};

mod common;
use common::{RecordingPayment, RecordingSeating, new_call_log, requests};

#[test]
fn test_approval_and_rejection_emit_structured_lines() {
    let _ = take_policy_metric_lines();

    let log = new_call_log();
    let mut payment = RecordingPayment::new(&log);
    let mut seating = RecordingSeating::new(&log);
    let mut metrics = PurchaseMetrics::new();

    // One approval with a distinctive account id, then one rejection.
    purchase_tickets(
        Some(987_654),
        &requests(&[(TicketType::Adult, 1)]),
        &mut payment,
        &mut seating,
        &mut metrics,
    )
    .unwrap();
    let _ = purchase_tickets(
        Some(987_654),
        &requests(&[(TicketType::Child, 1)]),
        &mut payment,
        &mut seating,
        &mut metrics,
    );

    let lines = take_policy_metric_lines();

    let approved = lines
        .iter()
        .filter(|line| {
            line.starts_with("purchase_approved_total")
                && line.contains("account_id=987654")
                && line.contains("cost_units=20")
                && line.contains("seats=1")
        })
        .count();
    assert_eq!(
        approved, 1,
        "expected exactly one tagged approval line, got {lines:?}"
    );

    assert!(
        lines
            .iter()
            .any(|line| line.starts_with("adult_gate_reject_total")
                && line.contains("reason=NoAdultTicket")),
        "expected an adult gate reject line, got {lines:?}"
    );
    assert!(
        lines
            .iter()
            .any(|line| line.starts_with("purchase_rejected_total")
                && line.contains("reason=NoAdultTicket")),
        "expected a pipeline reject line, got {lines:?}"
    );
}
