//! Drives one booking through the [`BookingState`] machine.

use booking_gateway_auth::TokenStore;
use booking_gateway_core::{
    BookingState, FlowError, GatewayError, PaymentHandoff, Result, TicketGroup, TicketRequest,
};

use crate::gateway::BookingGateway;

/// A single ticket purchase, from form submission to payment hand-off.
///
/// ```no_run
/// # async fn book(gateway: &booking_gateway_client::BookingGateway<booking_gateway_auth::FileTokenStore>)
/// # -> booking_gateway_core::Result<()> {
/// use booking_gateway_core::TicketRequest;
///
/// let mut flow = gateway.booking_flow();
/// let group = flow.submit(&TicketRequest::new("W1", 2)).await?;
/// let handoff = flow.start_payment().await?;
/// println!("{} -> {}", group.group_id, handoff.checkout_url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BookingFlow<'a, S> {
    gateway: &'a BookingGateway<S>,
    state: BookingState,
}

impl<'a, S: TokenStore> BookingFlow<'a, S> {
    pub(crate) const fn new(gateway: &'a BookingGateway<S>) -> Self {
        Self {
            gateway,
            state: BookingState::Idle,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &BookingState {
        &self.state
    }

    /// Validate the request, run the pending-payment guard and create the
    /// tickets. On success the flow waits in `AwaitingPaymentInit`; on any
    /// error it ends in `Failed` and the error is returned.
    ///
    /// # Errors
    ///
    /// `Flow` if the flow is not `Idle`, otherwise whatever stopped the
    /// booking (see [`TicketService::create_ticket`](crate::TicketService::create_ticket)).
    pub async fn submit(&mut self, ticket: &TicketRequest) -> Result<TicketGroup> {
        self.state.advance(BookingState::Validating)?;
        if let Err(e) = ticket.validate() {
            return self.fail(e);
        }

        self.state.advance(BookingState::CheckingPendingPayment)?;
        let tickets = self.gateway.tickets();
        if let Err(e) = tickets.pending_payment_guard().await {
            return self.fail(e);
        }

        self.state.advance(BookingState::CreatingTicket)?;
        match tickets.submit_ticket(ticket).await {
            Ok(group) => {
                self.state.advance(BookingState::AwaitingPaymentInit {
                    group: group.clone(),
                })?;
                Ok(group)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Ask for the checkout link of the created tickets.
    ///
    /// A failure leaves the flow in `AwaitingPaymentInit`: the tickets exist,
    /// so the user may simply try again.
    ///
    /// # Errors
    ///
    /// `Flow` unless the flow is `AwaitingPaymentInit`, otherwise whatever
    /// [`PaymentService::initiate_payment`](crate::PaymentService::initiate_payment) returns.
    pub async fn start_payment(&mut self) -> Result<PaymentHandoff> {
        let BookingState::AwaitingPaymentInit { group } = &self.state else {
            return Err(FlowError::InvalidTransition {
                from: self.state.name(),
                to: "Done",
            }
            .into());
        };

        let handoff = self
            .gateway
            .payments()
            .initiate_payment(&group.group_id)
            .await?;
        self.state.advance(BookingState::Done {
            handoff: handoff.clone(),
        })?;
        Ok(handoff)
    }

    /// Go back to `Idle` after a finished or failed booking.
    ///
    /// # Errors
    ///
    /// `Flow` while a booking is still in progress.
    pub fn reset(&mut self) -> Result<()> {
        self.state.reset()?;
        Ok(())
    }

    fn fail<T>(&mut self, reason: GatewayError) -> Result<T> {
        tracing::info!(state = self.state.name(), error = %reason, "Booking failed");
        self.state.advance(BookingState::Failed {
            reason: reason.clone(),
        })?;
        Err(reason)
    }
}
