//! Ticket booking.
//!
//! Creating a ticket is a two-step operation:
//!
//! 1. a read-only check asks the backend whether the user still has an
//!    unpaid ticket; if so the booking stops with `PendingPaymentExists`;
//! 2. the ticket group is created and its id returned.
//!
//! The check is not always reliable, so the create response is inspected as
//! well: any failure whose message carries the unpaid-ticket phrase is
//! re-tagged `PendingPaymentExists`, whatever status it arrived with.

use booking_gateway_auth::TokenStore;
use booking_gateway_core::{
    GatewayError, Result, TicketGroup, TicketRequest, mentions_unpaid_ticket,
};
use booking_gateway_runtime::with_retry;

use crate::executor::ApiRequest;
use crate::gateway::BookingGateway;
use crate::response;

/// `serviceType` sent to the pending-payment check.
pub const REGISTER_ATTEND_SERVICE: &str = "RegisterAttend";

const PENDING_FALLBACK: &str = "You have a ticket that has not been paid yet";

/// Ticket operations.
#[derive(Debug)]
pub struct TicketService<'a, S> {
    gateway: &'a BookingGateway<S>,
}

impl<'a, S: TokenStore> TicketService<'a, S> {
    pub(crate) const fn new(gateway: &'a BookingGateway<S>) -> Self {
        Self { gateway }
    }

    /// Ask the backend whether the user has an unpaid ticket.
    ///
    /// Single attempt: the check is advisory and the create call is
    /// inspected again afterwards.
    ///
    /// # Errors
    ///
    /// - `PendingPaymentExists` when the backend reports `isSuccess: false`,
    ///   or fails with a message carrying the unpaid-ticket phrase
    /// - any other executor error unchanged
    pub async fn check_pending_payment(&self) -> Result<()> {
        let request = ApiRequest::get(&self.gateway.endpoints().check_pending)
            .query("serviceType", REGISTER_ATTEND_SERVICE);

        let body = self
            .gateway
            .executor()
            .execute(&request)
            .await
            .map_err(retag_pending)?;

        if response::is_success(&body) == Some(false) {
            let message = response::message(&body).unwrap_or_else(|| PENDING_FALLBACK.to_string());
            tracing::info!(%message, "Unpaid ticket found, booking blocked");
            return Err(GatewayError::PendingPaymentExists { message });
        }
        Ok(())
    }

    /// The check as run before creating a ticket.
    ///
    /// Auth failures and a positive pending result stop the booking. Any
    /// other failure of the check is logged and ignored; the create call
    /// still catches the unpaid case through its error message.
    pub(crate) async fn pending_payment_guard(&self) -> Result<()> {
        match self.check_pending_payment().await {
            Ok(()) => Ok(()),
            Err(e @ (GatewayError::PendingPaymentExists { .. }
            | GatewayError::AuthRequired
            | GatewayError::AuthExpired)) => Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "Pending-payment check failed, continuing");
                Ok(())
            }
        }
    }

    /// Validate, check for unpaid tickets, then create the ticket group.
    ///
    /// # Errors
    ///
    /// - `ValidationError` for a zero quantity or blank workshop id (nothing is sent)
    /// - `PendingPaymentExists` when an unpaid ticket blocks the booking
    /// - `AuthRequired` / `AuthExpired` (never retried)
    /// - `NetworkUnavailable` / `ServerError` after retries
    /// - `UnexpectedResponse` when the response has no group id
    pub async fn create_ticket(&self, ticket: &TicketRequest) -> Result<TicketGroup> {
        ticket.validate()?;
        self.pending_payment_guard().await?;
        self.submit_ticket(ticket).await
    }

    /// The create call alone, for callers that already ran the guard.
    pub(crate) async fn submit_ticket(&self, ticket: &TicketRequest) -> Result<TicketGroup> {
        let request = ApiRequest::post(&self.gateway.endpoints().create_register_attend)
            .json(ticket.create_body());
        let executor = self.gateway.executor();
        let request = &request;

        // Re-tag per attempt so an unpaid-ticket answer ends the retry loop.
        let body = with_retry(self.gateway.retry_policy(), || async move {
            executor.execute(request).await.map_err(retag_pending)
        })
        .await?;
        let body = response::ensure_success(body, "Could not create the ticket").map_err(retag_pending)?;

        let group_id = response::string_field(&body, &["groupId"]).ok_or_else(|| {
            GatewayError::UnexpectedResponse {
                reason: "create ticket response has no groupId".to_string(),
            }
        })?;

        tracing::info!(
            workshop = %ticket.trimmed_workshop_id(),
            quantity = ticket.quantity,
            %group_id,
            "Ticket group created"
        );
        Ok(TicketGroup { group_id })
    }
}

/// Re-tag a failure whose message mentions the unpaid-ticket phrase.
fn retag_pending(error: GatewayError) -> GatewayError {
    let pending = match &error {
        GatewayError::ServerError { message, .. } | GatewayError::Rejected { message }
            if mentions_unpaid_ticket(message) =>
        {
            Some(message.clone())
        }
        _ => None,
    };
    pending.map_or(error, |message| GatewayError::PendingPaymentExists { message })
}
