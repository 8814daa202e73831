//! HTTP surface for the control tower.
//!
//! Thin request handlers translating wire requests into the orchestrator's
//! lifecycle operations and the catalog's admin operations, with structured
//! logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use catalog::MemoryCatalog;
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::OrderStore;
use orchestrator::{
    HttpDeliveryDispatcher, HttpPickupNotifier, HttpStockVerifier, OrderOrchestrator,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: OrderStore>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/order/checkout", post(routes::orders::checkout::<S>))
        .route("/order", get(routes::orders::list::<S>))
        .route(
            "/warehouse/order/ready/{order_id}",
            put(routes::warehouse::order_ready::<S>),
        )
        .route("/delivery/picked", put(routes::delivery::picked::<S>))
        .route("/delivery/completed", put(routes::delivery::completed::<S>))
        .route("/delivery/failed", put(routes::delivery::failed::<S>))
        .route("/shop", post(routes::admin::create_shop::<S>))
        .route("/shop/product/add", post(routes::admin::create_product::<S>))
        .route(
            "/shop/update/product/price",
            put(routes::admin::update_product_price::<S>),
        )
        .route(
            "/shop/delete/product",
            delete(routes::admin::delete_product::<S>),
        )
        .route(
            "/shop/{shop_id}/products",
            get(routes::admin::list_products::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state: catalog, HTTP collaborator clients, and
/// the orchestrator wired over the given store.
///
/// Seeds the default warehouse when the catalog has none, so checkout's
/// default warehouse assignment always resolves.
pub fn create_state<S: OrderStore>(store: S, config: &Config) -> Arc<AppState<S>> {
    let catalog = Arc::new(MemoryCatalog::new());
    let warehouse = catalog
        .add_warehouse(config.warehouse_address.clone())
        .expect("seed default warehouse");

    let orchestrator = OrderOrchestrator::new(
        Arc::new(store),
        Arc::clone(&catalog),
        HttpStockVerifier::new(config.warehouse_url.clone()),
        HttpDeliveryDispatcher::new(config.delivery_url.clone()),
        HttpPickupNotifier::new(config.warehouse_url.clone()),
    )
    .with_default_warehouse(warehouse.id);

    Arc::new(AppState {
        orchestrator,
        catalog,
    })
}
