//! Durable token store implementations.
//!
//! - **File Store** - one JSON document in the app's data directory

pub mod file;

pub use file::FileTokenStore;
