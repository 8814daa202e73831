//! Order entity implementation.

use chrono::{DateTime, Utc};
use common::{OrderId, WarehouseId};
use serde::{Deserialize, Serialize};

use super::{OrderError, OrderLine, OrderState};

/// A customer order tracked through its delivery lifecycle.
///
/// An order always has a non-empty delivery address and at least one line
/// item. Its state only moves forward through the lifecycle graph, and the
/// assigned warehouse never changes after creation. The orchestration layer
/// is the sole writer of `state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Identifier assigned by the store on first save.
    id: Option<OrderId>,

    /// Persisted revision, for optimistic concurrency. 0 = never saved.
    #[serde(default)]
    version: u64,

    /// Client delivery address.
    address: String,

    /// Current lifecycle state.
    state: OrderState,

    /// The warehouse that assembles and hands off this order.
    warehouse_id: WarehouseId,

    /// Line items, in request order.
    lines: Vec<OrderLine>,

    /// Creation timestamp.
    created_at: DateTime<Utc>,
}

impl Order {
    /// Assembles a new order in `Preparing` state.
    ///
    /// Enforces the entity invariants: non-empty address, at least one line
    /// item, every quantity at least 1.
    pub fn new(
        address: impl Into<String>,
        warehouse_id: WarehouseId,
        lines: Vec<OrderLine>,
    ) -> Result<Self, OrderError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(OrderError::EmptyAddress);
        }
        if lines.is_empty() {
            return Err(OrderError::NoLineItems);
        }
        if lines.iter().any(|line| line.quantity < 1) {
            return Err(OrderError::InvalidQuantity);
        }

        Ok(Self {
            id: None,
            version: 0,
            address,
            state: OrderState::Preparing,
            warehouse_id,
            lines,
            created_at: Utc::now(),
        })
    }

    /// Returns the identifier, if the order has been saved.
    pub fn id(&self) -> Option<OrderId> {
        self.id
    }

    /// Returns the persisted revision (0 for an unsaved order).
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns the client delivery address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> OrderState {
        self.state
    }

    /// Returns the assigned warehouse.
    pub fn warehouse_id(&self) -> WarehouseId {
        self.warehouse_id
    }

    /// Returns the line items in request order.
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Returns the creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Records the identity assigned by the store. Called by store
    /// implementations on first save.
    pub fn assign_id(&mut self, id: OrderId) {
        self.id = Some(id);
    }

    /// Records the revision written by the store.
    pub fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    /// Marks the order as handed to the delivery service.
    pub fn mark_prepared(&mut self) -> Result<(), OrderError> {
        self.transition_to(OrderState::Prepared)
    }

    /// Marks the order as collected by a courier.
    pub fn mark_in_delivery(&mut self) -> Result<(), OrderError> {
        self.transition_to(OrderState::InDelivery)
    }

    /// Marks the order as delivered to the client.
    pub fn mark_delivered(&mut self) -> Result<(), OrderError> {
        self.transition_to(OrderState::Delivered)
    }

    /// Marks the delivery as failed.
    pub fn mark_failed(&mut self) -> Result<(), OrderError> {
        self.transition_to(OrderState::Failed)
    }

    fn transition_to(&mut self, next: OrderState) -> Result<(), OrderError> {
        if !self.state.can_transition_to(next) {
            return Err(OrderError::IllegalTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}
