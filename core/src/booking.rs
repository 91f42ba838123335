//! Booking flow state machine.
//!
//! One ticket purchase walks through:
//!
//! ```text
//! Idle → Validating → CheckingPendingPayment → CreatingTicket → AwaitingPaymentInit → Done
//!            │                  │                     │
//!            └──────────────────┴─────────────────────┴──→ Failed { reason }
//! ```
//!
//! `Done` and `Failed` are terminal. The only way out of them is
//! [`BookingState::reset`], which models the user explicitly starting over.

use crate::error::GatewayError;
use crate::ticket::{PaymentHandoff, TicketGroup};
use thiserror::Error;

/// Errors raised by the state machine itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The requested step is not reachable from the current one.
    #[error("Cannot move booking flow from {from} to {to}")]
    InvalidTransition {
        /// Current state name
        from: &'static str,
        /// Requested state name
        to: &'static str,
    },
}

/// Where a single booking currently stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BookingState {
    /// Nothing in progress.
    #[default]
    Idle,
    /// Checking the request locally.
    Validating,
    /// Asking the server whether an unpaid ticket blocks this booking.
    CheckingPendingPayment,
    /// Creating the tickets.
    CreatingTicket,
    /// Tickets exist; waiting for the user to start payment.
    AwaitingPaymentInit {
        /// The created tickets
        group: TicketGroup,
    },
    /// Payment has been handed off.
    Done {
        /// Where the user pays
        handoff: PaymentHandoff,
    },
    /// The booking stopped.
    Failed {
        /// Why
        reason: GatewayError,
    },
}

impl BookingState {
    /// Short name used in logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Validating => "Validating",
            Self::CheckingPendingPayment => "CheckingPendingPayment",
            Self::CreatingTicket => "CreatingTicket",
            Self::AwaitingPaymentInit { .. } => "AwaitingPaymentInit",
            Self::Done { .. } => "Done",
            Self::Failed { .. } => "Failed",
        }
    }

    /// `Done` or `Failed`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Failed { .. })
    }

    /// Returns `true` if `next` directly follows `self`.
    #[must_use]
    pub const fn can_transition_to(&self, next: &Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Validating)
                | (Self::Validating, Self::CheckingPendingPayment | Self::Failed { .. })
                | (
                    Self::CheckingPendingPayment,
                    Self::CreatingTicket | Self::Failed { .. }
                )
                | (
                    Self::CreatingTicket,
                    Self::AwaitingPaymentInit { .. } | Self::Failed { .. }
                )
                | (Self::AwaitingPaymentInit { .. }, Self::Done { .. })
        )
    }

    /// Move to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidTransition`] if `next` does not directly
    /// follow the current state; the state is left unchanged.
    pub fn advance(&mut self, next: Self) -> Result<(), FlowError> {
        if !self.can_transition_to(&next) {
            return Err(FlowError::InvalidTransition {
                from: self.name(),
                to: next.name(),
            });
        }
        *self = next;
        Ok(())
    }

    /// Start over after a finished or failed booking.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidTransition`] while a booking is still in
    /// progress.
    pub fn reset(&mut self) -> Result<(), FlowError> {
        if !(self.is_terminal() || matches!(self, Self::Idle)) {
            return Err(FlowError::InvalidTransition {
                from: self.name(),
                to: "Idle",
            });
        }
        *self = Self::Idle;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed() -> BookingState {
        BookingState::Failed {
            reason: GatewayError::AuthExpired,
        }
    }

    fn group() -> TicketGroup {
        TicketGroup {
            group_id: "G1".to_string(),
        }
    }

    #[test]
    fn happy_path_walks_every_step() {
        let mut state = BookingState::Idle;
        let steps = [
            BookingState::Validating,
            BookingState::CheckingPendingPayment,
            BookingState::CreatingTicket,
            BookingState::AwaitingPaymentInit { group: group() },
            BookingState::Done {
                handoff: PaymentHandoff {
                    group_id: "G1".to_string(),
                    checkout_url: "https://pay.example/G1".to_string(),
                },
            },
        ];
        for step in steps {
            assert_eq!(state.advance(step), Ok(()));
        }
        assert!(state.is_terminal());
    }

    #[test]
    fn only_the_three_working_steps_can_fail() {
        assert!(BookingState::Validating.can_transition_to(&failed()));
        assert!(BookingState::CheckingPendingPayment.can_transition_to(&failed()));
        assert!(BookingState::CreatingTicket.can_transition_to(&failed()));
        assert!(!BookingState::Idle.can_transition_to(&failed()));
        assert!(!BookingState::AwaitingPaymentInit { group: group() }.can_transition_to(&failed()));
    }

    #[test]
    fn steps_cannot_be_skipped_or_reentered() {
        let mut state = BookingState::Validating;
        assert_eq!(
            state.advance(BookingState::CreatingTicket),
            Err(FlowError::InvalidTransition {
                from: "Validating",
                to: "CreatingTicket",
            })
        );
        assert_eq!(state, BookingState::Validating);
        assert!(state.advance(BookingState::Validating).is_err());
    }

    #[test]
    fn terminal_states_only_leave_through_reset() {
        let mut state = failed();
        assert!(state.advance(BookingState::Validating).is_err());
        assert_eq!(state.reset(), Ok(()));
        assert_eq!(state, BookingState::Idle);
        assert_eq!(state.advance(BookingState::Validating), Ok(()));
    }

    #[test]
    fn reset_is_refused_mid_flow() {
        let mut state = BookingState::CreatingTicket;
        assert!(state.reset().is_err());
        assert_eq!(state, BookingState::CreatingTicket);
    }
}
