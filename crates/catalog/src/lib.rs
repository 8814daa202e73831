//! Shop, product, and warehouse catalog.
//!
//! The orchestration core consumes only the [`ProductLookup`] and
//! [`WarehouseLookup`] capabilities; the CRUD surface exists for the admin
//! endpoints. Lookups are synchronous (backed by blocking storage) and run
//! on the blocking pool when called from async code.

mod error;
mod lookup;
mod memory;
mod money;
mod types;

pub use error::CatalogError;
pub use lookup::{ProductLookup, WarehouseLookup};
pub use memory::MemoryCatalog;
pub use money::Money;
pub use types::{Product, Shop, Warehouse};
