//! Workshop and master details.

use booking_gateway_auth::TokenStore;
use booking_gateway_core::{GatewayError, MasterDetails, Result, WorkshopDetails};
use booking_gateway_runtime::with_retry;

use crate::config::Endpoints;
use crate::executor::ApiRequest;
use crate::gateway::BookingGateway;
use crate::response;

/// Read-only catalogue lookups.
#[derive(Debug)]
pub struct WorkshopService<'a, S> {
    gateway: &'a BookingGateway<S>,
}

impl<'a, S: TokenStore> WorkshopService<'a, S> {
    pub(crate) const fn new(gateway: &'a BookingGateway<S>) -> Self {
        Self { gateway }
    }

    /// Fetch one workshop.
    ///
    /// # Errors
    ///
    /// `ValidationError` for a blank id, any executor error after retries,
    /// or `UnexpectedResponse` if the payload is not a workshop.
    pub async fn fetch_workshop(&self, workshop_id: &str) -> Result<WorkshopDetails> {
        let path = Endpoints::with_id(&self.gateway.endpoints().workshop, required(workshop_id)?);
        let body = self.get(ApiRequest::get(path)).await?;
        response::decode(&body, "workshop")
    }

    /// Fetch the master hosting a workshop.
    ///
    /// # Errors
    ///
    /// `ValidationError` for a blank id, any executor error after retries,
    /// or `UnexpectedResponse` if the payload is not a master.
    pub async fn fetch_master(&self, master_id: &str) -> Result<MasterDetails> {
        let path = Endpoints::with_id(&self.gateway.endpoints().master, required(master_id)?);
        let body = self.get(ApiRequest::get(path)).await?;
        response::decode(&body, "master")
    }

    async fn get(&self, request: ApiRequest) -> Result<serde_json::Value> {
        let executor = self.gateway.executor();
        with_retry(self.gateway.retry_policy(), || executor.execute(&request)).await
    }
}

fn required(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(GatewayError::validation("id", "No item selected"));
    }
    Ok(id)
}

/// The workshop a details screen is showing.
///
/// Holds at most one workshop. The screen calls [`refresh`](Self::refresh)
/// every time it gains focus, so the data is never older than the last visit,
/// and [`invalidate`](Self::invalidate) when the user navigates away.
#[derive(Debug, Clone, Default)]
pub struct WorkshopCache {
    current: Option<WorkshopDetails>,
}

impl WorkshopCache {
    /// An empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Fetch `workshop_id` and keep it, replacing whatever was cached.
    ///
    /// On failure the previous entry is dropped too: the screen must not keep
    /// showing a different workshop under the new id.
    ///
    /// # Errors
    ///
    /// Whatever [`WorkshopService::fetch_workshop`] returns.
    pub async fn refresh<S: TokenStore>(
        &mut self,
        service: &WorkshopService<'_, S>,
        workshop_id: &str,
    ) -> Result<&WorkshopDetails> {
        self.current = None;
        let workshop = service.fetch_workshop(workshop_id).await?;
        Ok(self.current.insert(workshop))
    }

    /// The last fetched workshop, if still valid.
    #[must_use]
    pub const fn cached(&self) -> Option<&WorkshopDetails> {
        self.current.as_ref()
    }

    /// Forget the cached workshop.
    pub fn invalidate(&mut self) {
        self.current = None;
    }
}
