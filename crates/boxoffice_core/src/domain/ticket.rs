//! Ticket types and per-type seat rules.
//!
//! `TicketType` is a closed set: every rule site (pricing, seat
//! requirement) matches exhaustively, so adding a variant forces each
//! rule to be revisited.

/// Kind of ticket a buyer can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketType {
    Adult,
    Child,
    Infant,
}

impl TicketType {
    /// All ticket types, in price-table order.
    pub const ALL: [TicketType; 3] = [TicketType::Adult, TicketType::Child, TicketType::Infant];

    /// Dense index for per-type count arrays.
    pub(crate) fn index(self) -> usize {
        match self {
            TicketType::Adult => 0,
            TicketType::Child => 1,
            TicketType::Infant => 2,
        }
    }

    /// Whether this ticket type occupies a reservable seat.
    ///
    /// Infants travel on an adult's lap and consume no seat capacity.
    pub fn seat_required(self) -> bool {
        match self {
            TicketType::Adult | TicketType::Child => true,
            TicketType::Infant => false,
        }
    }
}

/// A single (ticket type, quantity) entry as submitted by the caller.
///
/// Quantity zero is allowed and contributes nothing to any aggregate —
/// the policy gates operate purely on summed counts, never on an
/// entry's mere presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketTypeRequest {
    pub ticket_type: TicketType,
    pub quantity: u32,
}

impl TicketTypeRequest {
    pub fn new(ticket_type: TicketType, quantity: u32) -> Self {
        Self {
            ticket_type,
            quantity,
        }
    }
}
