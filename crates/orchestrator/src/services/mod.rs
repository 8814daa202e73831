//! Remote collaborator clients: stock verification, delivery dispatch, and
//! warehouse pickup notification.
//!
//! Each client is stateless and performs a single attempt; retry policy
//! belongs to the orchestrator. HTTP implementations speak JSON and treat
//! any non-2xx response as a rejection carrying the response body as
//! diagnostic text.

pub mod dispatch;
pub mod pickup;
pub mod stock;

use thiserror::Error;

pub use dispatch::{
    DeliveryDispatcher, DispatchLine, DispatchRequest, HttpDeliveryDispatcher,
    InMemoryDeliveryDispatcher,
};
pub use pickup::{HttpPickupNotifier, InMemoryPickupNotifier, PickupNotifier};
pub use stock::{HttpStockVerifier, InMemoryStockVerifier, StockLine, StockVerifier};

/// Failure of a single remote call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The call did not complete at the network/protocol level. Transport
    /// timeouts land here too.
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote collaborator answered with a non-2xx response; the body
    /// is kept as diagnostic text.
    #[error("remote call rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}
