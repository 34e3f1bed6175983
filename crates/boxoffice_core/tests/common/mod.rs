use std::cell::RefCell;
use std::rc::Rc;

use boxoffice_core::domain::{TicketType, TicketTypeRequest};
use boxoffice_core::purchase::{CollaboratorError, SeatReservationService, TicketPaymentService};

/// One observed collaborator invocation, in dispatch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorCall {
    Payment { account_id: i64, amount_units: u64 },
    SeatReservation { account_id: i64, seat_count: u32 },
}

/// Shared call log so one log captures the interleaving of both
/// collaborators.
pub type CallLog = Rc<RefCell<Vec<CollaboratorCall>>>;

pub fn new_call_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Payment double that records every call; fails if `fail_with` is set.
pub struct RecordingPayment {
    pub log: CallLog,
    pub fail_with: Option<String>,
}

impl RecordingPayment {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: Rc::clone(log),
            fail_with: None,
        }
    }
}

impl TicketPaymentService for RecordingPayment {
    fn make_payment(
        &mut self,
        account_id: i64,
        amount_units: u64,
    ) -> Result<(), CollaboratorError> {
        if let Some(reason) = &self.fail_with {
            return Err(CollaboratorError {
                service: "payment",
                reason: reason.clone(),
            });
        }
        self.log.borrow_mut().push(CollaboratorCall::Payment {
            account_id,
            amount_units,
        });
        Ok(())
    }
}

/// Seat-reservation double that records every call.
pub struct RecordingSeating {
    pub log: CallLog,
    pub fail_with: Option<String>,
}

impl RecordingSeating {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: Rc::clone(log),
            fail_with: None,
        }
    }
}

impl SeatReservationService for RecordingSeating {
    fn reserve_seat(&mut self, account_id: i64, seat_count: u32) -> Result<(), CollaboratorError> {
        if let Some(reason) = &self.fail_with {
            return Err(CollaboratorError {
                service: "seat_reservation",
                reason: reason.clone(),
            });
        }
        self.log
            .borrow_mut()
            .push(CollaboratorCall::SeatReservation {
                account_id,
                seat_count,
            });
        Ok(())
    }
}

/// Shorthand for building a request slice from (type, quantity) pairs.
pub fn requests(entries: &[(TicketType, u32)]) -> Vec<TicketTypeRequest> {
    entries
        .iter()
        .map(|(t, q)| TicketTypeRequest::new(*t, *q))
        .collect()
}
