//! Purchase domain types.

pub mod counts;
pub mod pricing;
pub mod ticket;

pub use counts::TicketCounts;
pub use pricing::{PRICE_TABLE, compute_total_cost, price_units};
pub use ticket::{TicketType, TicketTypeRequest};
