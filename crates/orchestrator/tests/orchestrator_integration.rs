//! Integration tests for the order orchestration engine.

use std::sync::Arc;
use std::time::Duration;

use catalog::{MemoryCatalog, Money};
use common::{OrderId, ProductId};
use domain::OrderState;
use order_store::{MemoryOrderStore, OrderStore};
use orchestrator::{
    CheckoutItem, CheckoutRequest, InMemoryDeliveryDispatcher, InMemoryPickupNotifier,
    InMemoryStockVerifier, OrchestratorError, OrderOrchestrator, RetryPolicy,
};

type TestOrchestrator = OrderOrchestrator<
    MemoryOrderStore,
    MemoryCatalog,
    InMemoryStockVerifier,
    InMemoryDeliveryDispatcher,
    InMemoryPickupNotifier,
>;

struct TestHarness {
    orchestrator: Arc<TestOrchestrator>,
    store: Arc<MemoryOrderStore>,
    catalog: Arc<MemoryCatalog>,
    stock: InMemoryStockVerifier,
    dispatcher: InMemoryDeliveryDispatcher,
    pickup: InMemoryPickupNotifier,
}

impl TestHarness {
    fn new() -> Self {
        let store = Arc::new(MemoryOrderStore::new());
        let catalog = Arc::new(MemoryCatalog::new());

        catalog.add_warehouse("1 Dock Rd").unwrap();
        let shop = catalog.create_shop("Corner Shop").unwrap();
        catalog
            .create_product("Widget", Money::from_cents(1000), shop.id)
            .unwrap();
        catalog
            .create_product("Gadget", Money::from_cents(2500), shop.id)
            .unwrap();

        let stock = InMemoryStockVerifier::new();
        let dispatcher = InMemoryDeliveryDispatcher::new();
        let pickup = InMemoryPickupNotifier::new();

        let orchestrator = Arc::new(
            OrderOrchestrator::new(
                Arc::clone(&store),
                Arc::clone(&catalog),
                stock.clone(),
                dispatcher.clone(),
                pickup.clone(),
            )
            .with_stock_retry(RetryPolicy {
                max_retries: 3,
                initial_backoff: Duration::from_millis(2),
                multiplier: 2.0,
            }),
        );

        Self {
            orchestrator,
            store,
            catalog,
            stock,
            dispatcher,
            pickup,
        }
    }

    async fn checkout(&self, address: &str, items: &[(i64, u32)]) -> Result<OrderId, OrchestratorError> {
        let request = CheckoutRequest {
            address: address.to_string(),
            items: items
                .iter()
                .map(|&(product_id, quantity)| CheckoutItem {
                    product_id: ProductId::new(product_id),
                    quantity,
                })
                .collect(),
        };
        let order = self.orchestrator.create_order(request).await?;
        Ok(order.id().expect("created order has an id"))
    }
}

#[tokio::test]
async fn elm_street_scenario() {
    let h = TestHarness::new();

    let order_id = h.checkout("12 Elm St", &[(1, 2), (2, 1)]).await.unwrap();

    let order = h.store.find_by_id(order_id).unwrap().unwrap();
    assert_eq!(order.state(), OrderState::Preparing);
    assert_eq!(order.address(), "12 Elm St");

    let mut lines: Vec<(i64, u32)> = order
        .lines()
        .iter()
        .map(|line| (line.product_id.get(), line.quantity))
        .collect();
    lines.sort();
    assert_eq!(lines, vec![(1, 2), (2, 1)]);
}

#[tokio::test]
async fn empty_direction_scenario() {
    let h = TestHarness::new();

    let err = h.checkout("", &[(1, 1)]).await.unwrap_err();
    assert_eq!(err.to_string(), "Direction cannot be empty");

    // No remote calls were made.
    assert_eq!(h.stock.call_count(), 0);
    assert_eq!(h.dispatcher.dispatch_count(), 0);
    assert_eq!(h.store.order_count(), 0);
}

#[tokio::test]
async fn warehouse_ready_on_terminal_order_scenario() {
    let h = TestHarness::new();

    let order_id = h.checkout("12 Elm St", &[(1, 1)]).await.unwrap();
    h.orchestrator.mark_warehouse_ready(order_id).await.unwrap();
    h.orchestrator.mark_picked_up(order_id).await.unwrap();
    h.orchestrator.mark_delivered(order_id).await.unwrap();
    let dispatches_so_far = h.dispatcher.dispatch_count();

    let err = h
        .orchestrator
        .mark_warehouse_ready(order_id)
        .await
        .unwrap_err();
    assert!(matches!(err, OrchestratorError::IllegalState(_)));
    assert_eq!(h.dispatcher.dispatch_count(), dispatches_so_far);
}

#[tokio::test]
async fn failed_delivery_lifecycle() {
    let h = TestHarness::new();

    let order_id = h.checkout("12 Elm St", &[(2, 3)]).await.unwrap();
    h.orchestrator.mark_warehouse_ready(order_id).await.unwrap();
    h.orchestrator.mark_picked_up(order_id).await.unwrap();
    h.orchestrator.mark_failed(order_id).await.unwrap();

    let order = h.store.find_by_id(order_id).unwrap().unwrap();
    assert_eq!(order.state(), OrderState::Failed);

    // Terminal means terminal: neither outcome can be recorded again.
    assert!(h.orchestrator.mark_delivered(order_id).await.is_err());
    assert!(h.orchestrator.mark_failed(order_id).await.is_err());
}

#[tokio::test]
async fn dispatch_payload_carries_resolved_names_and_addresses() {
    let h = TestHarness::new();

    let order_id = h.checkout("12 Elm St", &[(1, 2)]).await.unwrap();
    h.orchestrator.mark_warehouse_ready(order_id).await.unwrap();

    let request = h.dispatcher.last_request().unwrap();
    assert_eq!(request.order_id, order_id);
    assert_eq!(request.user_address, "12 Elm St");
    assert_eq!(request.warehouse_address, "1 Dock Rd");
    assert_eq!(request.products.len(), 1);
    assert_eq!(request.products[0].product, "Widget");
    assert_eq!(request.products[0].quantity, 2);
}

#[tokio::test]
async fn product_deleted_between_checkout_and_dispatch() {
    let h = TestHarness::new();

    let order_id = h.checkout("12 Elm St", &[(1, 1)]).await.unwrap();
    h.catalog.delete_product(ProductId::new(1)).unwrap();

    let err = h
        .orchestrator
        .mark_warehouse_ready(order_id)
        .await
        .unwrap_err();
    assert!(matches!(err, OrchestratorError::ProductNotFound(_)));
    assert_eq!(h.dispatcher.dispatch_count(), 0);
}

#[tokio::test]
async fn distinct_orders_progress_independently() {
    let h = TestHarness::new();

    let first = h.checkout("12 Elm St", &[(1, 1)]).await.unwrap();
    let second = h.checkout("34 Oak Ave", &[(2, 2)]).await.unwrap();

    // Drive both orders concurrently through dispatch.
    let (a, b) = tokio::join!(
        h.orchestrator.mark_warehouse_ready(first),
        h.orchestrator.mark_warehouse_ready(second),
    );
    assert!(a.unwrap());
    assert!(b.unwrap());

    h.orchestrator.mark_picked_up(first).await.unwrap();
    let first_order = h.store.find_by_id(first).unwrap().unwrap();
    let second_order = h.store.find_by_id(second).unwrap().unwrap();
    assert_eq!(first_order.state(), OrderState::InDelivery);
    assert_eq!(second_order.state(), OrderState::Prepared);
}

#[tokio::test]
async fn pickup_notice_failure_leaves_reconciliation_to_the_caller() {
    let h = TestHarness::new();

    let order_id = h.checkout("12 Elm St", &[(1, 1)]).await.unwrap();
    h.orchestrator.mark_warehouse_ready(order_id).await.unwrap();
    h.pickup.set_transport_failure(true);

    let err = h.orchestrator.mark_picked_up(order_id).await.unwrap_err();
    assert!(matches!(
        err,
        OrchestratorError::PickupNotConfirmed { source: Some(_), .. }
    ));

    // The order is in delivery even though the warehouse was not informed;
    // a later pickup call is an illegal transition, not a retry hook.
    let order = h.store.find_by_id(order_id).unwrap().unwrap();
    assert_eq!(order.state(), OrderState::InDelivery);
    let err = h.orchestrator.mark_picked_up(order_id).await.unwrap_err();
    assert!(matches!(err, OrchestratorError::IllegalState(_)));

    // The delivery outcome can still be recorded.
    h.orchestrator.mark_delivered(order_id).await.unwrap();
}

#[tokio::test]
async fn retry_recovers_mid_outage_without_double_checkout() {
    let h = TestHarness::new();
    h.stock.set_transport_failures(3);

    let order_id = h.checkout("12 Elm St", &[(1, 1)]).await.unwrap();
    assert_eq!(h.stock.call_count(), 4);
    assert_eq!(h.store.order_count(), 1);

    let order = h.store.find_by_id(order_id).unwrap().unwrap();
    assert_eq!(order.state(), OrderState::Preparing);
}
