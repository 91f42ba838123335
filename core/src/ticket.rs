//! Ticket booking payloads.

use crate::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};

/// Substring the backend puts in messages about an unpaid ticket.
///
/// Matching on a localized phrase is fragile, but the backend offers nothing
/// more structured when the pending-payment check is skipped or unreliable.
pub const UNPAID_TICKET_PHRASE: &str = "chưa thanh toán";

/// Returns `true` if a server message reports an unpaid ticket.
#[must_use]
pub fn mentions_unpaid_ticket(message: &str) -> bool {
    message.to_lowercase().contains(UNPAID_TICKET_PHRASE)
}

/// Input for creating tickets for a workshop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRequest {
    /// Workshop to attend. Surrounding whitespace is ignored.
    pub workshop_id: String,
    /// Number of tickets; must be positive.
    pub quantity: u32,
    /// Name printed on the ticket.
    pub customer_name: String,
    /// Contact phone.
    pub phone_number: String,
    /// Contact email.
    pub email: String,
}

impl TicketRequest {
    /// Create a request with empty contact details.
    #[must_use]
    pub fn new(workshop_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            workshop_id: workshop_id.into(),
            quantity,
            customer_name: String::new(),
            phone_number: String::new(),
            email: String::new(),
        }
    }

    /// Set the contact details.
    #[must_use]
    pub fn with_contact(
        mut self,
        customer_name: impl Into<String>,
        phone_number: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.customer_name = customer_name.into();
        self.phone_number = phone_number.into();
        self.email = email.into();
        self
    }

    /// The workshop id with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed_workshop_id(&self) -> &str {
        self.workshop_id.trim()
    }

    /// Checks the ticket service itself enforces.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when `quantity` is zero or the trimmed
    /// workshop id is empty.
    pub fn validate(&self) -> Result<()> {
        if self.quantity == 0 {
            return Err(GatewayError::validation(
                "quantity",
                "Please choose at least one ticket",
            ));
        }
        if self.trimmed_workshop_id().is_empty() {
            return Err(GatewayError::validation(
                "workshopId",
                "No workshop selected",
            ));
        }
        Ok(())
    }

    /// Contact-detail checks for the booking form.
    ///
    /// The ticket service does not call this; screens run it before submitting.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` naming the first blank contact field.
    pub fn validate_contact(&self) -> Result<()> {
        let fields = [
            ("customerName", &self.customer_name, "Please enter your name"),
            ("phoneNumber", &self.phone_number, "Please enter your phone number"),
            ("email", &self.email, "Please enter your email"),
        ];
        for (field, value, reason) in fields {
            if value.trim().is_empty() {
                return Err(GatewayError::validation(field, reason));
            }
        }
        Ok(())
    }

    /// Request body for the create-ticket endpoint.
    #[must_use]
    pub fn create_body(&self) -> serde_json::Value {
        serde_json::json!({
            "WorkshopId": self.trimmed_workshop_id(),
            "NumberOfTicket": self.quantity,
        })
    }
}

/// Tickets created together, paid for as one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketGroup {
    /// Server id of the ticket group.
    pub group_id: String,
}

/// Where the user completes payment for a ticket group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentHandoff {
    /// Ticket group being paid for.
    pub group_id: String,
    /// Page the UI opens to take the payment.
    pub checkout_url: String,
}
