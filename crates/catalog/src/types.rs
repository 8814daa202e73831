//! Catalog entities.

use common::{ProductId, ShopId, WarehouseId};
use serde::{Deserialize, Serialize};

use crate::Money;

/// A product offered by a shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub shop_id: ShopId,
}

/// A shop selling products through the control tower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
}

/// A warehouse that assembles orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    /// Street address couriers collect from.
    pub address: String,
}
