//! The order store contract.

use common::OrderId;
use domain::Order;

use crate::Result;

/// Durable storage façade for orders.
///
/// `save` assigns the identifier on first save and enforces an optimistic
/// version check on every later save: an order carrying a stale `version`
/// is rejected with [`crate::StoreError::VersionConflict`] instead of
/// overwriting a concurrent writer.
pub trait OrderStore: Send + Sync + 'static {
    /// Persists the order, returning the stored copy with its assigned id
    /// and bumped version.
    fn save(&self, order: Order) -> Result<Order>;

    /// Loads an order by id.
    fn find_by_id(&self, id: OrderId) -> Result<Option<Order>>;

    /// Loads every stored order, in id order.
    fn find_all(&self) -> Result<Vec<Order>>;
}
