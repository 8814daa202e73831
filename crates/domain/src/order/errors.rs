//! Order domain errors.

use thiserror::Error;

use super::OrderState;

/// Errors raised by the order entity itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// The client delivery address is empty.
    #[error("Direction cannot be empty")]
    EmptyAddress,

    /// The order has no line items.
    #[error("Products cannot be empty")]
    NoLineItems,

    /// A line item quantity is below 1.
    #[error("Product quantity must be greater than 0")]
    InvalidQuantity,

    /// A lifecycle transition was attempted from a state that does not
    /// permit it.
    #[error("order cannot move from {from} to {to}")]
    IllegalTransition { from: OrderState, to: OrderState },
}
