//! Order orchestration engine.
//!
//! The control tower's core: turns a checkout request into a durable order
//! record and drives it through the delivery lifecycle by calling the
//! warehouse and delivery collaborators. Coordination is synchronous
//! request/response: stock verification is retried with exponential
//! backoff, dispatch and pickup notification are single-attempt.

pub mod coordinator;
pub mod error;
pub mod retry;
pub mod services;

pub use coordinator::{CheckoutItem, CheckoutRequest, OrderOrchestrator};
pub use error::{CreateOrderFailure, OrchestratorError};
pub use retry::RetryPolicy;
pub use services::{
    DeliveryDispatcher, DispatchLine, DispatchRequest, HttpDeliveryDispatcher, HttpPickupNotifier,
    HttpStockVerifier, InMemoryDeliveryDispatcher, InMemoryPickupNotifier, InMemoryStockVerifier,
    PickupNotifier, RemoteError, StockLine, StockVerifier,
};
