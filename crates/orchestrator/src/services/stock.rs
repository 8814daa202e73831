//! Stock verification client.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::ProductId;
use serde::Serialize;

use super::RemoteError;

/// One requested (product, quantity) pair for a stock check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StockCheckBody<'a> {
    product_list: &'a [StockLine],
}

/// Confirms with the warehouse that requested quantities are available.
///
/// Stateless, single attempt; the orchestrator wraps this call in its
/// retry policy.
#[async_trait]
pub trait StockVerifier: Send + Sync {
    /// Returns whether stock is sufficient for every requested line.
    async fn check_stock(&self, lines: &[StockLine]) -> Result<bool, RemoteError>;
}

/// Stock verification over HTTP against the warehouse service.
#[derive(Debug, Clone)]
pub struct HttpStockVerifier {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStockVerifier {
    /// Creates a client against the warehouse base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl StockVerifier for HttpStockVerifier {
    async fn check_stock(&self, lines: &[StockLine]) -> Result<bool, RemoteError> {
        let response = self
            .client
            .post(format!("{}/order/create", self.base_url))
            .json(&StockCheckBody {
                product_list: lines,
            })
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

#[derive(Debug, Default)]
struct InMemoryStockState {
    sufficient: bool,
    transport_failures: u32,
    rejections: u32,
    calls: u32,
}

/// In-memory stock verifier for testing.
#[derive(Debug, Clone)]
pub struct InMemoryStockVerifier {
    state: Arc<RwLock<InMemoryStockState>>,
}

impl Default for InMemoryStockVerifier {
    fn default() -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryStockState {
                sufficient: true,
                transport_failures: 0,
                rejections: 0,
                calls: 0,
            })),
        }
    }
}

impl InMemoryStockVerifier {
    /// Creates a verifier that reports sufficient stock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the sufficiency answer.
    pub fn set_sufficient(&self, sufficient: bool) {
        self.state.write().unwrap().sufficient = sufficient;
    }

    /// Makes the next `n` calls fail with a transport error before the
    /// service recovers.
    pub fn set_transport_failures(&self, n: u32) {
        self.state.write().unwrap().transport_failures = n;
    }

    /// Makes the next `n` calls fail with a non-2xx rejection before the
    /// service recovers.
    pub fn set_rejections(&self, n: u32) {
        self.state.write().unwrap().rejections = n;
    }

    /// Returns how many times `check_stock` was invoked.
    pub fn call_count(&self) -> u32 {
        self.state.read().unwrap().calls
    }
}

#[async_trait]
impl StockVerifier for InMemoryStockVerifier {
    async fn check_stock(&self, _lines: &[StockLine]) -> Result<bool, RemoteError> {
        let mut state = self.state.write().unwrap();
        state.calls += 1;

        if state.transport_failures > 0 {
            state.transport_failures -= 1;
            return Err(RemoteError::Transport(
                "stock service unreachable".to_string(),
            ));
        }
        if state.rejections > 0 {
            state.rejections -= 1;
            return Err(RemoteError::Rejected {
                status: 500,
                body: "Failed to check stock".to_string(),
            });
        }

        Ok(state.sufficient)
    }
}
