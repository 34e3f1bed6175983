//! Fixed price table and total-cost computation.
//!
//! Prices are process-wide constants in whole currency units. The
//! lookup is fallible in shape: a type absent from the table is a
//! defect and must fail-closed before any payment is taken, even
//! though the closed enum makes that unreachable with this table.

use super::counts::TicketCounts;
use super::ticket::TicketType;

/// Unit price per ticket type, whole currency units.
pub const PRICE_TABLE: [(TicketType, u32); 3] = [
    (TicketType::Adult, 20),
    (TicketType::Child, 10),
    (TicketType::Infant, 0),
];

/// Unit price for a ticket type, or `None` if the table has no entry.
pub fn price_units(ticket_type: TicketType) -> Option<u32> {
    PRICE_TABLE
        .iter()
        .find(|(t, _)| *t == ticket_type)
        .map(|(_, price)| *price)
}

/// Total cost of an aggregated purchase, or the first ticket type
/// missing from the price table.
pub fn compute_total_cost(counts: &TicketCounts) -> Result<u64, TicketType> {
    let mut total: u64 = 0;
    for ticket_type in TicketType::ALL {
        let count = counts.count(ticket_type);
        if count == 0 {
            continue;
        }
        let Some(price) = price_units(ticket_type) else {
            return Err(ticket_type);
        };
        total += u64::from(price) * u64::from(count);
    }
    Ok(total)
}
