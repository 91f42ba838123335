//! Domain services.
//!
//! Each service borrows the [`BookingGateway`](crate::BookingGateway), shapes
//! request payloads, runs them through the executor (with the retry policy
//! where the call is safe to repeat) and maps the reply to a typed result.

mod account;
mod payment;
mod ticket;
mod workshop;

pub use account::{AccountService, RegisterOutcome};
pub use payment::PaymentService;
pub use ticket::{REGISTER_ATTEND_SERVICE, TicketService};
pub use workshop::{WorkshopCache, WorkshopService};
