//! Aggregated per-type ticket counts.
//!
//! Aggregation is an order-independent fold from the request sequence
//! into a (type -> total quantity) mapping. Duplicate entries for the
//! same type sum, never overwrite. The resulting `TicketCounts` is the
//! sole input to every downstream validation and computation step.

use super::ticket::{TicketType, TicketTypeRequest};

/// Per-type ticket totals for one purchase request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TicketCounts {
    totals: [u32; TicketType::ALL.len()],
}

impl TicketCounts {
    /// Aggregate a request sequence into per-type totals.
    ///
    /// Saturating addition keeps a hostile quantity sum from wrapping;
    /// a saturated total still trips the maximum-ticket gate.
    pub fn from_requests(requests: &[TicketTypeRequest]) -> Self {
        let mut counts = Self::default();
        for request in requests {
            let slot = &mut counts.totals[request.ticket_type.index()];
            *slot = slot.saturating_add(request.quantity);
        }
        counts
    }

    /// Total requested quantity for one ticket type.
    pub fn count(&self, ticket_type: TicketType) -> u32 {
        self.totals[ticket_type.index()]
    }

    /// Total requested quantity across all ticket types.
    pub fn total(&self) -> u32 {
        TicketType::ALL
            .iter()
            .fold(0u32, |sum, t| sum.saturating_add(self.count(*t)))
    }

    /// Number of seats the purchase occupies.
    ///
    /// Sums every type with a seat requirement; infants are excluded.
    pub fn seats_required(&self) -> u32 {
        TicketType::ALL
            .iter()
            .filter(|t| t.seat_required())
            .fold(0u32, |sum, t| sum.saturating_add(self.count(*t)))
    }
}
