//! The order orchestrator: lifecycle sequencing over the store, the
//! catalog, and the three remote collaborators.

use std::sync::Arc;
use std::time::Instant;

use common::{OrderId, ProductId, WarehouseId};
use domain::{Order, OrderError, OrderLine, OrderState};
use order_store::OrderStore;
use tokio::task;

use catalog::{ProductLookup, WarehouseLookup};

use crate::error::{CreateOrderFailure, OrchestratorError};
use crate::retry::{RetryPolicy, retry_with_backoff};
use crate::services::{
    DeliveryDispatcher, DispatchLine, DispatchRequest, PickupNotifier, StockLine, StockVerifier,
};

/// One requested line of a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A checkout request entering the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Client delivery address.
    pub address: String,
    pub items: Vec<CheckoutItem>,
}

/// Drives orders through `PREPARING → PREPARED → IN_DELIVERY →
/// DELIVERED | FAILED`.
///
/// Remote calls are awaited on the async runtime; store and catalog access
/// is blocking and always runs on the blocking pool, so lifecycle
/// operations never occupy an event-loop thread with I/O. Distinct orders
/// share no mutable state; concurrent operations on the same order are
/// resolved by the store's optimistic version check (the later writer
/// loses).
pub struct OrderOrchestrator<S, C, V, D, P>
where
    S: OrderStore,
    C: ProductLookup + WarehouseLookup + 'static,
    V: StockVerifier,
    D: DeliveryDispatcher,
    P: PickupNotifier,
{
    store: Arc<S>,
    catalog: Arc<C>,
    stock: V,
    dispatcher: D,
    pickup: P,
    default_warehouse: WarehouseId,
    stock_retry: RetryPolicy,
}

impl<S, C, V, D, P> OrderOrchestrator<S, C, V, D, P>
where
    S: OrderStore,
    C: ProductLookup + WarehouseLookup + 'static,
    V: StockVerifier,
    D: DeliveryDispatcher,
    P: PickupNotifier,
{
    /// Creates an orchestrator with the default retry policy (3 retries,
    /// 1s initial backoff) and warehouse 1 as the default assignment.
    pub fn new(store: Arc<S>, catalog: Arc<C>, stock: V, dispatcher: D, pickup: P) -> Self {
        Self {
            store,
            catalog,
            stock,
            dispatcher,
            pickup,
            default_warehouse: WarehouseId::new(1),
            stock_retry: RetryPolicy::default(),
        }
    }

    /// Overrides the stock verification retry policy.
    pub fn with_stock_retry(mut self, policy: RetryPolicy) -> Self {
        self.stock_retry = policy;
        self
    }

    /// Overrides the warehouse assigned to new orders.
    pub fn with_default_warehouse(mut self, warehouse_id: WarehouseId) -> Self {
        self.default_warehouse = warehouse_id;
        self
    }

    /// Turns a checkout request into a persisted order in `PREPARING`.
    ///
    /// Validates the request, verifies stock with the bounded retry
    /// policy, resolves product references, and persists the assembled
    /// order off the async path.
    #[tracing::instrument(skip(self, request), fields(items = request.items.len()))]
    pub async fn create_order(
        &self,
        request: CheckoutRequest,
    ) -> Result<Order, OrchestratorError> {
        if request.address.trim().is_empty() {
            return Err(OrchestratorError::Validation(
                "Direction cannot be empty".to_string(),
            ));
        }
        if request.items.is_empty() {
            return Err(OrchestratorError::Validation(
                "Products cannot be empty".to_string(),
            ));
        }
        for item in &request.items {
            if !item.product_id.is_valid() {
                return Err(OrchestratorError::Validation(
                    "Product id must be greater than 0".to_string(),
                ));
            }
            if item.quantity < 1 {
                return Err(OrchestratorError::Validation(
                    "Product quantity must be greater than 0".to_string(),
                ));
            }
        }

        let stock_lines: Vec<StockLine> = request
            .items
            .iter()
            .map(|item| StockLine {
                product_id: item.product_id,
                quantity: item.quantity,
            })
            .collect();

        let started = Instant::now();
        let sufficient = retry_with_backoff(&self.stock_retry, |attempt| {
            if attempt > 1 {
                metrics::counter!("stock_check_retries_total").increment(1);
            }
            self.stock.check_stock(&stock_lines)
        })
        .await
        .map_err(|exhausted| OrchestratorError::CreateOrder {
            source: CreateOrderFailure::RetriesExhausted {
                attempts: exhausted.attempts,
                last: exhausted.last,
            },
        })?;
        metrics::histogram!("stock_check_duration_seconds")
            .record(started.elapsed().as_secs_f64());

        if !sufficient {
            tracing::info!("checkout refused, stock is not sufficient");
            return Err(OrchestratorError::CreateOrder {
                source: CreateOrderFailure::InsufficientStock,
            });
        }

        let store = Arc::clone(&self.store);
        let catalog = Arc::clone(&self.catalog);
        let warehouse_id = self.default_warehouse;
        let order = task::spawn_blocking(move || -> Result<Order, OrchestratorError> {
            let warehouse = catalog.warehouse(warehouse_id)?;

            let mut lines = Vec::with_capacity(request.items.len());
            for item in &request.items {
                let product = catalog.product(item.product_id)?;
                lines.push(OrderLine::new(product.id, item.quantity));
            }

            let order = Order::new(request.address, warehouse.id, lines)
                .map_err(|e| OrchestratorError::Validation(e.to_string()))?;
            Ok(store.save(order)?)
        })
        .await
        .map_err(|e| OrchestratorError::Internal(e.to_string()))??;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(order_id = %display_id(&order), "order created");
        Ok(order)
    }

    /// Advances a `PREPARING` order to `PREPARED` by handing it to the
    /// delivery service.
    ///
    /// Returns `Ok(false)` without touching the order when the delivery
    /// service refuses the dispatch, an expected business outcome.
    #[tracing::instrument(skip(self))]
    pub async fn mark_warehouse_ready(
        &self,
        order_id: OrderId,
    ) -> Result<bool, OrchestratorError> {
        validate_order_id(order_id)?;

        let store = Arc::clone(&self.store);
        let catalog = Arc::clone(&self.catalog);
        let (order, dispatch_request) = task::spawn_blocking(
            move || -> Result<(Order, DispatchRequest), OrchestratorError> {
                let order = store
                    .find_by_id(order_id)?
                    .ok_or(OrchestratorError::OrderNotFound(order_id))?;

                // The dispatcher must never be invoked for an order that
                // already left PREPARING.
                if !order.state().can_prepare() {
                    return Err(OrderError::IllegalTransition {
                        from: order.state(),
                        to: OrderState::Prepared,
                    }
                    .into());
                }

                let warehouse = catalog.warehouse(order.warehouse_id())?;
                let mut products = Vec::with_capacity(order.lines().len());
                for line in order.lines() {
                    let product = catalog.product(line.product_id)?;
                    products.push(DispatchLine {
                        product: product.name,
                        quantity: line.quantity,
                    });
                }

                let request = DispatchRequest {
                    order_id,
                    user_address: order.address().to_string(),
                    warehouse_address: warehouse.address,
                    products,
                };
                Ok((order, request))
            },
        )
        .await
        .map_err(|e| OrchestratorError::Internal(e.to_string()))??;

        let accepted = self.dispatcher.dispatch(&dispatch_request).await?;
        if !accepted {
            tracing::warn!(%order_id, "delivery service refused the dispatch");
            return Ok(false);
        }

        let mut order = order;
        order.mark_prepared()?;
        let store = Arc::clone(&self.store);
        task::spawn_blocking(move || store.save(order))
            .await
            .map_err(|e| OrchestratorError::Internal(e.to_string()))??;

        metrics::counter!("orders_dispatched_total").increment(1);
        tracing::info!(%order_id, "order dispatched to delivery");
        Ok(true)
    }

    /// Records a courier pickup: `PREPARED → IN_DELIVERY`, persisted, then
    /// the warehouse is notified.
    ///
    /// The transition is optimistic (the pickup already happened
    /// physically), so it is committed before the notice goes out. A failed
    /// notice surfaces as [`OrchestratorError::PickupNotConfirmed`] while
    /// the order stays in delivery.
    #[tracing::instrument(skip(self))]
    pub async fn mark_picked_up(&self, order_id: OrderId) -> Result<bool, OrchestratorError> {
        validate_order_id(order_id)?;

        let store = Arc::clone(&self.store);
        task::spawn_blocking(move || -> Result<Order, OrchestratorError> {
            let mut order = store
                .find_by_id(order_id)?
                .ok_or(OrchestratorError::OrderNotFound(order_id))?;
            order.mark_in_delivery()?;
            Ok(store.save(order)?)
        })
        .await
        .map_err(|e| OrchestratorError::Internal(e.to_string()))??;

        match self.pickup.notify_picked_up(order_id).await {
            Ok(true) => {
                metrics::counter!("order_pickups_total").increment(1);
                tracing::info!(%order_id, "pickup recorded and warehouse notified");
                Ok(true)
            }
            Ok(false) => {
                tracing::error!(%order_id, "warehouse did not confirm the pickup notice");
                Err(OrchestratorError::PickupNotConfirmed {
                    order_id,
                    source: None,
                })
            }
            Err(err) => {
                tracing::error!(%order_id, error = %err, "pickup notice failed");
                Err(OrchestratorError::PickupNotConfirmed {
                    order_id,
                    source: Some(err),
                })
            }
        }
    }

    /// Records a successful delivery: `IN_DELIVERY → DELIVERED`. Purely
    /// local.
    #[tracing::instrument(skip(self))]
    pub async fn mark_delivered(&self, order_id: OrderId) -> Result<(), OrchestratorError> {
        validate_order_id(order_id)?;

        let store = Arc::clone(&self.store);
        task::spawn_blocking(move || -> Result<(), OrchestratorError> {
            let mut order = store
                .find_by_id(order_id)?
                .ok_or(OrchestratorError::OrderNotFound(order_id))?;
            order.mark_delivered()?;
            store.save(order)?;
            Ok(())
        })
        .await
        .map_err(|e| OrchestratorError::Internal(e.to_string()))??;

        metrics::counter!("orders_delivered_total").increment(1);
        tracing::info!(%order_id, "order delivered");
        Ok(())
    }

    /// Records a failed delivery: `IN_DELIVERY → FAILED`. Purely local.
    #[tracing::instrument(skip(self))]
    pub async fn mark_failed(&self, order_id: OrderId) -> Result<(), OrchestratorError> {
        validate_order_id(order_id)?;

        let store = Arc::clone(&self.store);
        task::spawn_blocking(move || -> Result<(), OrchestratorError> {
            let mut order = store
                .find_by_id(order_id)?
                .ok_or(OrchestratorError::OrderNotFound(order_id))?;
            order.mark_failed()?;
            store.save(order)?;
            Ok(())
        })
        .await
        .map_err(|e| OrchestratorError::Internal(e.to_string()))??;

        metrics::counter!("orders_failed_total").increment(1);
        tracing::warn!(%order_id, "order marked as failed");
        Ok(())
    }

    /// Loads every order, for the read-only listing endpoint.
    pub async fn all_orders(&self) -> Result<Vec<Order>, OrchestratorError> {
        let store = Arc::clone(&self.store);
        let orders = task::spawn_blocking(move || store.find_all())
            .await
            .map_err(|e| OrchestratorError::Internal(e.to_string()))??;
        Ok(orders)
    }
}

fn validate_order_id(order_id: OrderId) -> Result<(), OrchestratorError> {
    if !order_id.is_valid() {
        return Err(OrchestratorError::Validation(
            "Order id must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

fn display_id(order: &Order) -> String {
    order
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "unsaved".to_string())
}
