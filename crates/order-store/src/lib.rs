//! Durable storage for order records.
//!
//! Storage access is synchronous: callers on an async runtime are expected
//! to move [`OrderStore`] calls onto the blocking pool
//! (`tokio::task::spawn_blocking`) so no event-loop thread ever waits on
//! disk I/O.

mod error;
mod memory;
mod redb_store;
mod store;

pub use error::StoreError;
pub use memory::MemoryOrderStore;
pub use redb_store::RedbOrderStore;
pub use store::OrderStore;

/// Convenience type alias for store results.
pub type Result<T> = std::result::Result<T, StoreError>;
