//! Warehouse pickup notifier.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::OrderId;

use super::RemoteError;

/// Informs the warehouse that a courier has collected an order.
///
/// Single attempt, never retried.
#[async_trait]
pub trait PickupNotifier: Send + Sync {
    /// Returns whether the warehouse confirmed the pickup notice.
    async fn notify_picked_up(&self, order_id: OrderId) -> Result<bool, RemoteError>;
}

/// Pickup notification over HTTP against the warehouse service.
#[derive(Debug, Clone)]
pub struct HttpPickupNotifier {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPickupNotifier {
    /// Creates a client against the warehouse base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PickupNotifier for HttpPickupNotifier {
    async fn notify_picked_up(&self, order_id: OrderId) -> Result<bool, RemoteError> {
        let response = self
            .client
            .put(format!("{}/order/picked-up/{}", self.base_url, order_id))
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Rejected { status, body });
        }

        // The warehouse answers 2xx with an informational body; any
        // successful status counts as confirmation.
        Ok(true)
    }
}

#[derive(Debug)]
struct InMemoryPickupState {
    confirm: bool,
    transport_failure: bool,
    notified: Vec<OrderId>,
}

/// In-memory pickup notifier for testing.
#[derive(Debug, Clone)]
pub struct InMemoryPickupNotifier {
    state: Arc<RwLock<InMemoryPickupState>>,
}

impl Default for InMemoryPickupNotifier {
    fn default() -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryPickupState {
                confirm: true,
                transport_failure: false,
                notified: Vec::new(),
            })),
        }
    }
}

impl InMemoryPickupNotifier {
    /// Creates a notifier that confirms every pickup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether the warehouse confirms pickup notices.
    pub fn set_confirm(&self, confirm: bool) {
        self.state.write().unwrap().confirm = confirm;
    }

    /// Makes every call fail with a transport error.
    pub fn set_transport_failure(&self, fail: bool) {
        self.state.write().unwrap().transport_failure = fail;
    }

    /// Returns the orders the warehouse was notified about.
    pub fn notified_orders(&self) -> Vec<OrderId> {
        self.state.read().unwrap().notified.clone()
    }
}

#[async_trait]
impl PickupNotifier for InMemoryPickupNotifier {
    async fn notify_picked_up(&self, order_id: OrderId) -> Result<bool, RemoteError> {
        let mut state = self.state.write().unwrap();
        if state.transport_failure {
            return Err(RemoteError::Transport(
                "warehouse service unreachable".to_string(),
            ));
        }
        state.notified.push(order_id);
        Ok(state.confirm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_notified_orders() {
        let notifier = InMemoryPickupNotifier::new();
        assert!(notifier.notify_picked_up(OrderId::new(1)).await.unwrap());

        notifier.set_confirm(false);
        assert!(!notifier.notify_picked_up(OrderId::new(2)).await.unwrap());

        assert_eq!(
            notifier.notified_orders(),
            vec![OrderId::new(1), OrderId::new(2)]
        );
    }

    #[tokio::test]
    async fn transport_failure_records_nothing() {
        let notifier = InMemoryPickupNotifier::new();
        notifier.set_transport_failure(true);
        assert!(matches!(
            notifier.notify_picked_up(OrderId::new(1)).await,
            Err(RemoteError::Transport(_))
        ));
        assert!(notifier.notified_orders().is_empty());
    }
}
