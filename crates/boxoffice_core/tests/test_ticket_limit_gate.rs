//! Tests for the total ticket count gate.
//!
//! The aggregated total must be in [1, 20]. Zero totals and totals
//! above the maximum reject; 1 and exactly 20 pass.

use boxoffice_core::policy::{
    MAX_TICKETS_PER_PURCHASE, TicketLimitInput, TicketLimitMetrics, TicketLimitRejectReason,
    TicketLimitResult, evaluate_ticket_limit, ticket_limit_reject_total,
};

fn input(total: u32) -> TicketLimitInput {
    TicketLimitInput {
        total_requested: total,
        max_tickets_per_purchase: MAX_TICKETS_PER_PURCHASE,
    }
}

// ─── Zero total ─────────────────────────────────────────────────────────

#[test]
fn test_zero_total_rejects() {
    let mut m = TicketLimitMetrics::new();

    let result = evaluate_ticket_limit(&input(0), &mut m);

    assert_eq!(
        result,
        TicketLimitResult::Rejected {
            reason: TicketLimitRejectReason::NoTicketsRequested,
            total_requested: 0,
        }
    );
    assert_eq!(m.none_requested_total(), 1);
    assert!(
        ticket_limit_reject_total(TicketLimitRejectReason::NoTicketsRequested) >= 1,
        "process counter must be non-zero after a reject"
    );
}

// ─── Boundaries ─────────────────────────────────────────────────────────

#[test]
fn test_single_ticket_is_the_lower_bound() {
    let mut m = TicketLimitMetrics::new();

    let result = evaluate_ticket_limit(&input(1), &mut m);

    assert_eq!(result, TicketLimitResult::Allowed { total_requested: 1 });
    assert_eq!(m.allowed_total(), 1);
}

#[test]
fn test_exactly_twenty_allowed() {
    let mut m = TicketLimitMetrics::new();

    let result = evaluate_ticket_limit(&input(20), &mut m);

    assert_eq!(
        result,
        TicketLimitResult::Allowed {
            total_requested: 20
        },
        "boundary at exactly the maximum must pass"
    );
}

#[test]
fn test_twenty_one_rejects() {
    let mut m = TicketLimitMetrics::new();

    let result = evaluate_ticket_limit(&input(21), &mut m);

    assert_eq!(
        result,
        TicketLimitResult::Rejected {
            reason: TicketLimitRejectReason::MaxTicketCountExceeded,
            total_requested: 21,
        }
    );
    assert_eq!(m.max_exceeded_total(), 1);
}

#[test]
fn test_far_over_maximum_rejects() {
    let mut m = TicketLimitMetrics::new();

    let result = evaluate_ticket_limit(&input(u32::MAX), &mut m);

    assert!(
        matches!(
            result,
            TicketLimitResult::Rejected {
                reason: TicketLimitRejectReason::MaxTicketCountExceeded,
                ..
            }
        ),
        "saturated totals must still reject"
    );
}

#[test]
fn test_threshold_travels_in_the_input() {
    // A tighter venue limit applies without touching the gate.
    let mut m = TicketLimitMetrics::new();
    let tight = TicketLimitInput {
        total_requested: 5,
        max_tickets_per_purchase: 4,
    };

    let result = evaluate_ticket_limit(&tight, &mut m);

    assert_eq!(
        result,
        TicketLimitResult::Rejected {
            reason: TicketLimitRejectReason::MaxTicketCountExceeded,
            total_requested: 5,
        }
    );
}
