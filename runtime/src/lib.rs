//! # Booking Gateway Runtime
//!
//! Execution helpers that sit between the domain services and the request
//! executor. Today that is the fixed-delay [`retry`] policy every service call
//! composes instead of re-implementing its own loop.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod retry;

pub use retry::{RetryPolicy, RetryPolicyBuilder, retry_with_predicate, with_retry};
