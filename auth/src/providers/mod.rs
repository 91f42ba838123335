//! Storage providers.
//!
//! Traits for the on-device state the gateway depends on. Services take these
//! as generic parameters, so tests swap in the in-memory mocks and the app
//! injects the durable implementation.

pub mod token_store;

pub use token_store::TokenStore;
