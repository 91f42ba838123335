//! Mock provider implementations for testing.
//!
//! In-memory stand-ins for the storage providers, for unit and integration
//! tests across the workspace.

pub mod token_store;

pub use token_store::MockTokenStore;
