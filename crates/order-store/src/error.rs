//! Store error types.

use common::OrderId;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The saved order carried a stale version; a concurrent writer won.
    #[error("version conflict for order {id}: expected {expected}, found {actual}")]
    VersionConflict {
        id: OrderId,
        expected: u64,
        actual: u64,
    },

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// Transaction error.
    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Table error.
    #[error("table error: {0}")]
    Table(#[from] redb::TableError),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),

    /// Commit error.
    #[error("commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
