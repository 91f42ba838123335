//! The gateway handle screens hold.

use booking_gateway_auth::TokenStore;
use booking_gateway_core::Result;
use booking_gateway_runtime::RetryPolicy;
use std::sync::Arc;

use crate::config::{Endpoints, GatewayConfig};
use crate::executor::RequestExecutor;
use crate::flow::BookingFlow;
use crate::services::{AccountService, PaymentService, TicketService, WorkshopService};

/// Entry point to every backend operation.
///
/// Owns the executor (and through it the injected token store), the endpoint
/// table and the retry policy. Services borrow it, so a screen can keep one
/// `BookingGateway` and ask it for whichever service it needs. Clones are
/// cheap and share the connection pool and the store.
#[derive(Debug, Clone)]
pub struct BookingGateway<S> {
    executor: RequestExecutor<S>,
    endpoints: Arc<Endpoints>,
    retry: RetryPolicy,
}

impl<S: TokenStore> BookingGateway<S> {
    /// Build a gateway around an injected token store.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration is unusable.
    pub fn new(config: &GatewayConfig, store: S) -> Result<Self> {
        Ok(Self {
            executor: RequestExecutor::new(config, store)?,
            endpoints: Arc::new(config.endpoints.clone()),
            retry: config.retry,
        })
    }

    /// Login, registration, profile.
    pub const fn account(&self) -> AccountService<'_, S> {
        AccountService::new(self)
    }

    /// Workshop and master details.
    pub const fn workshops(&self) -> WorkshopService<'_, S> {
        WorkshopService::new(self)
    }

    /// Pending-payment check and ticket creation.
    pub const fn tickets(&self) -> TicketService<'_, S> {
        TicketService::new(self)
    }

    /// Payment hand-off.
    pub const fn payments(&self) -> PaymentService<'_, S> {
        PaymentService::new(self)
    }

    /// A fresh booking flow in the `Idle` state.
    pub const fn booking_flow(&self) -> BookingFlow<'_, S> {
        BookingFlow::new(self)
    }

    /// The request executor.
    pub const fn executor(&self) -> &RequestExecutor<S> {
        &self.executor
    }

    /// The injected token store.
    pub const fn store(&self) -> &S {
        self.executor.store()
    }

    /// Backend paths.
    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Retry policy applied to retried calls.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }
}
