//! Orchestrator error taxonomy.
//!
//! Validation, not-found, and illegal-state errors are never retried and
//! always surface to the caller. Transport errors and remote rejections are
//! retried only around stock verification; everywhere else they surface
//! immediately.

use common::{OrderId, ProductId, WarehouseId};
use domain::OrderError;
use order_store::StoreError;
use thiserror::Error;

use crate::services::RemoteError;

/// Errors raised by the lifecycle operations.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Malformed input; surfaced verbatim.
    #[error("{0}")]
    Validation(String),

    /// Referenced order does not exist.
    #[error("Order with id {0} not found")]
    OrderNotFound(OrderId),

    /// A line item referenced a product that no longer exists: a race
    /// between catalog and order creation, not a client error.
    #[error("Product with id {0} not found")]
    ProductNotFound(ProductId),

    /// The assigned warehouse does not exist.
    #[error("Warehouse with id {0} not found")]
    WarehouseNotFound(WarehouseId),

    /// Lifecycle operation attempted from a state that does not permit it.
    #[error(transparent)]
    IllegalState(#[from] OrderError),

    /// A remote collaborator call failed outside the retried stock check.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Checkout failed; the cause distinguishes an explicit stock refusal
    /// from an unreachable warehouse.
    #[error("Failed to create order due to: {source}")]
    CreateOrder {
        #[source]
        source: CreateOrderFailure,
    },

    /// The order was moved to `IN_DELIVERY` and persisted, but the
    /// warehouse pickup notice failed. The state change is not rolled
    /// back; reconciliation is the caller's responsibility.
    #[error("Failed to notify warehouse that order {order_id} has been picked up; the order stays in delivery")]
    PickupNotConfirmed {
        order_id: OrderId,
        #[source]
        source: Option<RemoteError>,
    },

    /// Persistence failure, including lost optimistic-concurrency races.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Runtime failure executing a blocking task.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Why checkout was refused.
#[derive(Debug, Error)]
pub enum CreateOrderFailure {
    /// The warehouse answered and reported insufficient stock.
    #[error("Stock is not sufficient")]
    InsufficientStock,

    /// The warehouse could not be reached; retries were exhausted.
    #[error("stock verification retries exhausted after {attempts} attempts")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: RemoteError,
    },
}

impl From<catalog::CatalogError> for OrchestratorError {
    fn from(err: catalog::CatalogError) -> Self {
        match err {
            catalog::CatalogError::ProductNotFound(id) => OrchestratorError::ProductNotFound(id),
            catalog::CatalogError::WarehouseNotFound(id) => {
                OrchestratorError::WarehouseNotFound(id)
            }
            catalog::CatalogError::Validation(msg) => OrchestratorError::Validation(msg),
            catalog::CatalogError::ShopNotFound(_) => OrchestratorError::Internal(err.to_string()),
        }
    }
}
