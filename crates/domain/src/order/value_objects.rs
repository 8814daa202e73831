//! Value objects for the order domain.

use common::ProductId;
use serde::{Deserialize, Serialize};

/// A line item: one product and the quantity ordered.
///
/// The product reference is validated against the catalog once, when the
/// order is created; it is not re-checked afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// The product being ordered.
    pub product_id: ProductId,

    /// Quantity ordered, always at least 1.
    pub quantity: u32,
}

impl OrderLine {
    /// Creates a new line item.
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}
