//! Catalog error types.

use common::{ProductId, ShopId, WarehouseId};
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Referenced product does not exist.
    #[error("Product with id {0} not found")]
    ProductNotFound(ProductId),

    /// Referenced shop does not exist.
    #[error("Shop with id {0} not found")]
    ShopNotFound(ShopId),

    /// Referenced warehouse does not exist.
    #[error("Warehouse with id {0} not found")]
    WarehouseNotFound(WarehouseId),

    /// Malformed input to a catalog operation.
    #[error("{0}")]
    Validation(String),
}
