//! # Booking Gateway Core
//!
//! Plain data and pure logic shared by every layer of the booking gateway.
//!
//! This crate has no I/O. It provides:
//!
//! - **Data model**: [`Session`], [`Credentials`], [`TicketRequest`],
//!   [`WorkshopDetails`] and the other payloads exchanged with the backend
//! - **Error taxonomy**: [`GatewayError`], the single error type every
//!   operation returns to the UI layer
//! - **Booking flow**: the [`booking::BookingState`] machine a ticket purchase
//!   walks through
//!
//! ## Example
//!
//! ```
//! use booking_gateway_core::{GatewayError, TicketRequest};
//!
//! let request = TicketRequest::new("  W1  ", 0);
//! let err = request.validate().unwrap_err();
//! assert!(matches!(err, GatewayError::ValidationError { .. }));
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod account;
pub mod booking;
pub mod error;
pub mod session;
pub mod ticket;
pub mod workshop;

pub use account::{ImageUpload, Registration, UserProfile};
pub use booking::{BookingState, FlowError};
pub use error::{GatewayError, Result};
pub use session::{Credentials, Session, UserFlags};
pub use ticket::{
    PaymentHandoff, TicketGroup, TicketRequest, UNPAID_TICKET_PHRASE, mentions_unpaid_ticket,
};
pub use workshop::{MasterDetails, WorkshopDetails};
