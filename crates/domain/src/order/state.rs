//! Order state machine.

use serde::{Deserialize, Serialize};

/// The state of an order in its lifecycle.
///
/// State transitions:
/// ```text
/// Preparing ──► Prepared ──► InDelivery ──┬──► Delivered
///                                         └──► Failed
/// ```
///
/// `Delivered` and `Failed` are terminal; `Failed` is reachable only from
/// `InDelivery`. No state is re-enterable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    /// Order accepted and persisted, warehouse is assembling it.
    #[default]
    Preparing,

    /// Warehouse finished assembly and the delivery service accepted the
    /// dispatch.
    Prepared,

    /// A courier collected the order.
    InDelivery,

    /// Order reached the client (terminal state).
    Delivered,

    /// Delivery failed (terminal state).
    Failed,
}

impl OrderState {
    /// Returns true if the order can be handed to the delivery service.
    pub fn can_prepare(&self) -> bool {
        matches!(self, OrderState::Preparing)
    }

    /// Returns true if a courier pickup can be recorded in this state.
    pub fn can_start_delivery(&self) -> bool {
        matches!(self, OrderState::Prepared)
    }

    /// Returns true if a delivery outcome (delivered or failed) can be
    /// recorded in this state.
    pub fn can_close(&self) -> bool {
        matches!(self, OrderState::InDelivery)
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderState::Delivered | OrderState::Failed)
    }

    /// Returns true if the transition `self -> next` is allowed by the
    /// lifecycle graph.
    pub fn can_transition_to(&self, next: OrderState) -> bool {
        match next {
            OrderState::Preparing => false,
            OrderState::Prepared => self.can_prepare(),
            OrderState::InDelivery => self.can_start_delivery(),
            OrderState::Delivered | OrderState::Failed => self.can_close(),
        }
    }

    /// Returns the wire name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderState::Preparing => "PREPARING",
            OrderState::Prepared => "PREPARED",
            OrderState::InDelivery => "IN_DELIVERY",
            OrderState::Delivered => "DELIVERED",
            OrderState::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
