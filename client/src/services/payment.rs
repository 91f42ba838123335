//! Payment hand-off.

use booking_gateway_auth::TokenStore;
use booking_gateway_core::{GatewayError, PaymentHandoff, Result};
use booking_gateway_runtime::with_retry;
use serde_json::json;

use crate::executor::ApiRequest;
use crate::gateway::BookingGateway;
use crate::response;

/// Keys the checkout link may come back under.
const CHECKOUT_KEYS: &[&str] = &["checkoutUrl", "paymentUrl", "url"];

/// Payment operations.
#[derive(Debug)]
pub struct PaymentService<'a, S> {
    gateway: &'a BookingGateway<S>,
}

impl<'a, S: TokenStore> PaymentService<'a, S> {
    pub(crate) const fn new(gateway: &'a BookingGateway<S>) -> Self {
        Self { gateway }
    }

    /// Start paying for a ticket group.
    ///
    /// Returns the checkout page the UI opens; the payment itself happens
    /// outside the app.
    ///
    /// # Errors
    ///
    /// - `ValidationError` for a blank group id
    /// - `AuthRequired` / `AuthExpired`
    /// - `NetworkUnavailable` / `ServerError` after retries, `Rejected`
    /// - `UnexpectedResponse` when no checkout link comes back
    pub async fn initiate_payment(&self, group_id: &str) -> Result<PaymentHandoff> {
        let group_id = group_id.trim();
        if group_id.is_empty() {
            return Err(GatewayError::validation("groupId", "No ticket to pay for"));
        }

        let request = ApiRequest::post(&self.gateway.endpoints().create_payment)
            .json(json!({ "groupId": group_id }));
        let executor = self.gateway.executor();

        let body = with_retry(self.gateway.retry_policy(), || executor.execute(&request)).await?;
        let body = response::ensure_success(body, "Could not start the payment")?;

        let checkout_url = response::string_field(&body, CHECKOUT_KEYS)
            .or_else(|| body.as_str().map(str::trim).filter(|s| s.starts_with("http")).map(String::from))
            .ok_or_else(|| GatewayError::UnexpectedResponse {
                reason: "payment response has no checkout link".to_string(),
            })?;

        tracing::info!(%group_id, "Payment initiated");
        Ok(PaymentHandoff {
            group_id: group_id.to_string(),
            checkout_url,
        })
    }
}
