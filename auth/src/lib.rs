//! # Booking Gateway Auth
//!
//! Where the logged-in user's session lives between app launches.
//!
//! The [`providers::TokenStore`] trait is the only thing the request executor
//! and the account service depend on. Pick an implementation per target:
//!
//! - [`stores::FileTokenStore`]: a JSON document in the app's data directory
//! - [`mocks::MockTokenStore`]: in-memory, for tests (`test-utils` feature)
//!
//! ## Example
//!
//! ```no_run
//! use booking_gateway_auth::{FileTokenStore, TokenStore};
//! use booking_gateway_core::Session;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileTokenStore::new("/data/booking/session.json");
//! store.save(&Session::new("T1", "R1", "a@b.com")).await?;
//! assert!(store.load().await?.is_some());
//! store.clear().await?;
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;
pub mod providers;
pub mod stores;

pub use error::{Result, StoreError};
pub use providers::TokenStore;
pub use stores::FileTokenStore;
