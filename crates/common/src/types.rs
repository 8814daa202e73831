use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        ///
        /// Wraps an `i64` database identifier to prevent mixing up ids of
        /// different entities. Identifiers are assigned by the store on first
        /// save; lifecycle operations reject values below 1 before any lookup.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier from a raw database value.
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the underlying value.
            pub fn get(&self) -> i64 {
                self.0
            }

            /// Returns true if this is a valid (positive) identifier.
            pub fn is_valid(&self) -> bool {
                self.0 >= 1
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id! {
    /// Unique identifier for an order.
    OrderId
}

entity_id! {
    /// Unique identifier for a product in the shop catalog.
    ProductId
}

entity_id! {
    /// Unique identifier for a warehouse.
    WarehouseId
}

entity_id! {
    /// Unique identifier for a shop.
    ShopId
}
