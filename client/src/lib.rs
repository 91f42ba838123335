//! # Booking Gateway Client
//!
//! Everything a screen needs to talk to the workshop booking backend.
//!
//! - [`RequestExecutor`] sends requests, attaches the stored bearer token and
//!   maps outcomes to [`GatewayError`](booking_gateway_core::GatewayError)
//! - the services ([`AccountService`], [`WorkshopService`], [`TicketService`],
//!   [`PaymentService`]) shape payloads and parse replies
//! - [`BookingFlow`] walks one purchase from form to checkout link
//!
//! All of them hang off a [`BookingGateway`], built from a [`GatewayConfig`]
//! and an injected [`TokenStore`](booking_gateway_auth::TokenStore).
//!
//! ## Example
//!
//! ```no_run
//! use booking_gateway_auth::FileTokenStore;
//! use booking_gateway_client::{BookingGateway, GatewayConfig};
//! use booking_gateway_core::Credentials;
//!
//! # async fn example() -> booking_gateway_core::Result<()> {
//! let config = GatewayConfig::from_env();
//! let store = FileTokenStore::new(&config.session_file);
//! let gateway = BookingGateway::new(&config, store)?;
//!
//! gateway
//!     .account()
//!     .login(Credentials::new("a@b.com", "secret"))
//!     .await?;
//! let workshop = gateway.workshops().fetch_workshop("W1").await?;
//! println!("{}", workshop.workshop_name);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod executor;
pub mod flow;
pub mod gateway;
mod response;
pub mod services;

pub use config::{Endpoints, GatewayConfig};
pub use executor::{ApiRequest, FilePart, MultipartBody, RequestBody, RequestExecutor};
pub use flow::BookingFlow;
pub use gateway::BookingGateway;
pub use services::{
    AccountService, PaymentService, RegisterOutcome, TicketService, WorkshopCache,
    WorkshopService,
};
