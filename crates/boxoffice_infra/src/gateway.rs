//! Journal-backed collaborator implementations.
//!
//! These adapters satisfy the core's payment and seat-reservation
//! contracts by appending the corresponding receipt event and flushing
//! it to disk. A journal failure surfaces as a `CollaboratorError`,
//! which the purchase pipeline propagates unmodified.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use boxoffice_core::purchase::{CollaboratorError, SeatReservationService, TicketPaymentService};

use crate::journal::{JournalMetrics, ReceiptEvent, ReceiptJournal};

/// Journal handle shared by both gateways so payments and reservations
/// interleave in one file in dispatch order.
pub type SharedJournal = Rc<RefCell<ReceiptJournal>>;

/// Wrap a journal for use by the two gateways.
pub fn share_journal(journal: ReceiptJournal) -> SharedJournal {
    Rc::new(RefCell::new(journal))
}

fn now_ms() -> u64 {
    // Pre-epoch clocks collapse to 0; the timestamp is audit metadata,
    // not an ordering key.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

fn record(
    journal: &SharedJournal,
    metrics: &mut JournalMetrics,
    service: &'static str,
    event: ReceiptEvent,
) -> Result<(), CollaboratorError> {
    let mut journal = journal.borrow_mut();
    journal
        .append(event, metrics)
        .and_then(|()| journal.flush(metrics))
        .map_err(|err| CollaboratorError {
            service,
            reason: err.to_string(),
        })
}

// ─── Payment gateway ────────────────────────────────────────────────────

/// Payment collaborator that journals every payment taken.
pub struct JournalPaymentGateway {
    journal: SharedJournal,
    metrics: JournalMetrics,
}

impl JournalPaymentGateway {
    pub fn new(journal: &SharedJournal) -> Self {
        Self {
            journal: Rc::clone(journal),
            metrics: JournalMetrics::new(),
        }
    }

    /// Journal metrics for this gateway's appends.
    pub fn metrics(&self) -> &JournalMetrics {
        &self.metrics
    }
}

impl TicketPaymentService for JournalPaymentGateway {
    fn make_payment(
        &mut self,
        account_id: i64,
        amount_units: u64,
    ) -> Result<(), CollaboratorError> {
        record(
            &self.journal,
            &mut self.metrics,
            "payment",
            ReceiptEvent::PaymentTaken {
                account_id,
                amount_units,
                ts_ms: now_ms(),
            },
        )
    }
}

// ─── Seat reservation gateway ───────────────────────────────────────────

/// Seat-reservation collaborator that journals every reservation.
pub struct JournalSeatReservation {
    journal: SharedJournal,
    metrics: JournalMetrics,
}

impl JournalSeatReservation {
    pub fn new(journal: &SharedJournal) -> Self {
        Self {
            journal: Rc::clone(journal),
            metrics: JournalMetrics::new(),
        }
    }

    /// Journal metrics for this gateway's appends.
    pub fn metrics(&self) -> &JournalMetrics {
        &self.metrics
    }
}

impl SeatReservationService for JournalSeatReservation {
    fn reserve_seat(&mut self, account_id: i64, seat_count: u32) -> Result<(), CollaboratorError> {
        record(
            &self.journal,
            &mut self.metrics,
            "seat_reservation",
            ReceiptEvent::SeatsReserved {
                account_id,
                seat_count,
                ts_ms: now_ms(),
            },
        )
    }
}
