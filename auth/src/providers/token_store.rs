//! Token store trait.

use crate::error::Result;
use booking_gateway_core::{Session, UserFlags};

/// Durable home of the single active [`Session`] and its [`UserFlags`].
///
/// # Implementation Notes
///
/// - `save()` must be all-or-nothing from the caller's point of view: a
///   concurrent `load()` sees either the previous session or the new one
/// - `load()` returns `Ok(None)` when nothing is stored; only storage faults
///   are errors
/// - `clear()` is idempotent
/// - No network effects
pub trait TokenStore: Send + Sync {
    /// Persist a session, replacing any previous one. Flags are kept.
    ///
    /// # Errors
    ///
    /// Returns error if the storage write fails.
    fn save(&self, session: &Session) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Read the current session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(session))`: a session with a non-empty access token
    /// - `Ok(None)`: nothing stored, or the stored access token is blank
    ///
    /// # Errors
    ///
    /// Returns error if the storage read fails or the stored data is corrupt.
    fn load(&self) -> impl std::future::Future<Output = Result<Option<Session>>> + Send;

    /// Remove the session and the user flags.
    ///
    /// # Errors
    ///
    /// Returns error if the storage delete fails.
    fn clear(&self) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Read the user-scoped flags; defaults when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns error if the storage read fails or the stored data is corrupt.
    fn flags(&self) -> impl std::future::Future<Output = Result<UserFlags>> + Send;

    /// Replace the user-scoped flags without touching the tokens.
    ///
    /// # Errors
    ///
    /// Returns error if the storage write fails.
    fn set_flags(&self, flags: UserFlags)
    -> impl std::future::Future<Output = Result<()>> + Send;
}
