//! In-memory order store for testing.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use common::OrderId;
use domain::Order;

use crate::{OrderStore, Result, StoreError};

#[derive(Debug, Default)]
struct Inner {
    orders: HashMap<OrderId, Order>,
    next_id: i64,
}

/// In-memory order store.
///
/// Provides the same contract as the redb implementation, including id
/// assignment and the optimistic version check.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryOrderStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored orders.
    pub fn order_count(&self) -> usize {
        self.inner.read().unwrap().orders.len()
    }
}

impl OrderStore for MemoryOrderStore {
    fn save(&self, mut order: Order) -> Result<Order> {
        let mut inner = self.inner.write().unwrap();

        let id = match order.id() {
            Some(id) => {
                if let Some(stored) = inner.orders.get(&id)
                    && stored.version() != order.version()
                {
                    return Err(StoreError::VersionConflict {
                        id,
                        expected: order.version(),
                        actual: stored.version(),
                    });
                }
                id
            }
            None => {
                inner.next_id += 1;
                let id = OrderId::new(inner.next_id);
                order.assign_id(id);
                id
            }
        };

        order.set_version(order.version() + 1);
        inner.orders.insert(id, order.clone());
        Ok(order)
    }

    fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        Ok(self.inner.read().unwrap().orders.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Order>> {
        let inner = self.inner.read().unwrap();
        let mut orders: Vec<Order> = inner.orders.values().cloned().collect();
        orders.sort_by_key(|order| order.id());
        Ok(orders)
    }
}
