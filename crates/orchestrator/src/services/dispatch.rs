//! Delivery dispatch client.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::OrderId;
use serde::Serialize;

use super::RemoteError;

/// One line of a dispatch payload: display name and quantity. The
/// orchestrator resolves product ids to names before dispatching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchLine {
    pub product: String,
    pub quantity: u32,
}

/// Payload handed to the delivery service for courier assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRequest {
    pub order_id: OrderId,
    /// Where the courier delivers to.
    pub user_address: String,
    /// Where the courier collects from.
    pub warehouse_address: String,
    pub products: Vec<DispatchLine>,
}

/// Hands a prepared order to the delivery service.
///
/// Single attempt, never retried: a dispatch that succeeded server-side
/// must not be repeated.
#[async_trait]
pub trait DeliveryDispatcher: Send + Sync {
    /// Returns whether the delivery service accepted the order. A `false`
    /// answer is a normal business outcome, not an error.
    async fn dispatch(&self, request: &DispatchRequest) -> Result<bool, RemoteError>;
}

/// Delivery dispatch over HTTP against the delivery service.
#[derive(Debug, Clone)]
pub struct HttpDeliveryDispatcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDeliveryDispatcher {
    /// Creates a client against the delivery service base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl DeliveryDispatcher for HttpDeliveryDispatcher {
    async fn dispatch(&self, request: &DispatchRequest) -> Result<bool, RemoteError> {
        let response = self
            .client
            .post(format!("{}/order", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Rejected { status, body });
        }

        response
            .json::<bool>()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))
    }
}

#[derive(Debug)]
struct InMemoryDispatchState {
    accept: bool,
    transport_failure: bool,
    requests: Vec<DispatchRequest>,
}

/// In-memory delivery dispatcher for testing.
#[derive(Debug, Clone)]
pub struct InMemoryDeliveryDispatcher {
    state: Arc<RwLock<InMemoryDispatchState>>,
}

impl Default for InMemoryDeliveryDispatcher {
    fn default() -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryDispatchState {
                accept: true,
                transport_failure: false,
                requests: Vec::new(),
            })),
        }
    }
}

impl InMemoryDeliveryDispatcher {
    /// Creates a dispatcher that accepts every order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether the delivery service accepts dispatches.
    pub fn set_accept(&self, accept: bool) {
        self.state.write().unwrap().accept = accept;
    }

    /// Makes every call fail with a transport error.
    pub fn set_transport_failure(&self, fail: bool) {
        self.state.write().unwrap().transport_failure = fail;
    }

    /// Returns how many dispatch calls were attempted.
    pub fn dispatch_count(&self) -> usize {
        self.state.read().unwrap().requests.len()
    }

    /// Returns the most recent dispatch payload.
    pub fn last_request(&self) -> Option<DispatchRequest> {
        self.state.read().unwrap().requests.last().cloned()
    }
}

#[async_trait]
impl DeliveryDispatcher for InMemoryDeliveryDispatcher {
    async fn dispatch(&self, request: &DispatchRequest) -> Result<bool, RemoteError> {
        let mut state = self.state.write().unwrap();
        if state.transport_failure {
            return Err(RemoteError::Transport(
                "delivery service unreachable".to_string(),
            ));
        }
        state.requests.push(request.clone());
        Ok(state.accept)
    }
}
