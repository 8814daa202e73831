//! Integration tests for the control tower HTTP surface.
//!
//! The warehouse and delivery collaborators are stubbed with small axum
//! routers on ephemeral ports; everything else is the real stack over the
//! in-memory order store.

use std::sync::OnceLock;

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::routing::{post, put};
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::MemoryOrderStore;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            metrics_exporter_prometheus::PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

/// Serves a stub collaborator and returns its base URL.
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });
    format!("http://{addr}")
}

/// A warehouse stub answering stock checks and pickup notices.
fn warehouse_stub(sufficient: bool) -> Router {
    Router::new()
        .route(
            "/order/create",
            post(move || async move { Json(sufficient) }),
        )
        .route(
            "/order/picked-up/{order_id}",
            put(|| async { "Order marked as picked up" }),
        )
}

/// A delivery stub answering dispatch requests.
fn delivery_stub(accept: bool) -> Router {
    Router::new().route("/order", post(move || async move { Json(accept) }))
}

async fn setup(warehouse_url: String, delivery_url: String) -> Router {
    let config = api::Config {
        warehouse_url,
        delivery_url,
        ..api::Config::default()
    };
    let state = api::create_state(MemoryOrderStore::new(), &config);
    api::create_app(state, get_metrics_handle())
}

/// The usual happy-path wiring: stock sufficient, dispatch accepted.
async fn setup_happy() -> Router {
    let warehouse = spawn_stub(warehouse_stub(true)).await;
    let delivery = spawn_stub(delivery_stub(true)).await;
    setup(warehouse, delivery).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Registers a shop with two products and returns their ids.
async fn seed_catalog(app: &Router) -> (i64, Vec<i64>) {
    let (status, shop) = send(
        app,
        json_request("POST", "/shop", serde_json::json!({"name": "Corner Shop"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let shop_id = shop["id"].as_i64().unwrap();

    let mut product_ids = Vec::new();
    for (name, price_cents) in [("Widget", 1000), ("Gadget", 2500)] {
        let (status, product) = send(
            app,
            json_request(
                "POST",
                "/shop/product/add",
                serde_json::json!({"name": name, "priceCents": price_cents, "shopId": shop_id}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        product_ids.push(product["id"].as_i64().unwrap());
    }
    (shop_id, product_ids)
}

async fn checkout(app: &Router, products: serde_json::Value) -> (StatusCode, serde_json::Value) {
    send(
        app,
        json_request(
            "POST",
            "/order/checkout",
            serde_json::json!({"direction": "12 Elm St", "products": products}),
        ),
    )
    .await
}

#[tokio::test]
async fn health_check() {
    let app = setup_happy().await;
    let (status, body) = send(&app, empty_request("GET", "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn metrics_endpoint_renders() {
    let app = setup_happy().await;
    let response = app
        .clone()
        .oneshot(empty_request("GET", "/metrics"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn checkout_creates_an_order_in_preparing() {
    let app = setup_happy().await;
    let (_, products) = seed_catalog(&app).await;

    let (status, body) = checkout(
        &app,
        serde_json::json!([
            {"productId": products[0], "quantity": 2},
            {"productId": products[1], "quantity": 1},
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["state"], "PREPARING");
    assert_eq!(body["direction"], "12 Elm St");
    assert_eq!(body["orderId"], 1);
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn checkout_with_empty_direction_is_rejected() {
    let app = setup_happy().await;
    let (_, products) = seed_catalog(&app).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/order/checkout",
            serde_json::json!({
                "direction": "",
                "products": [{"productId": products[0], "quantity": 1}],
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Direction cannot be empty");
}

#[tokio::test]
async fn checkout_with_insufficient_stock_conflicts() {
    let warehouse = spawn_stub(warehouse_stub(false)).await;
    let delivery = spawn_stub(delivery_stub(true)).await;
    let app = setup(warehouse, delivery).await;
    let (_, products) = seed_catalog(&app).await;

    let (status, body) = checkout(
        &app,
        serde_json::json!([{"productId": products[0], "quantity": 5}]),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        "Failed to create order due to: Stock is not sufficient"
    );

    // Nothing was persisted.
    let (_, orders) = send(&app, empty_request("GET", "/order")).await;
    assert_eq!(orders.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn checkout_with_unknown_product_is_not_found() {
    let app = setup_happy().await;

    let (status, body) = checkout(&app, serde_json::json!([{"productId": 99, "quantity": 1}])).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product with id 99 not found");
}

#[tokio::test]
async fn warehouse_ready_dispatches_the_order() {
    let app = setup_happy().await;
    let (_, products) = seed_catalog(&app).await;
    checkout(&app, serde_json::json!([{"productId": products[0], "quantity": 1}])).await;

    let (status, body) = send(&app, empty_request("PUT", "/warehouse/order/ready/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Delivery service was reached successfully.");

    let (_, orders) = send(&app, empty_request("GET", "/order")).await;
    assert_eq!(orders[0]["state"], "PREPARED");
}

#[tokio::test]
async fn refused_dispatch_answers_service_unavailable() {
    let warehouse = spawn_stub(warehouse_stub(true)).await;
    let delivery = spawn_stub(delivery_stub(false)).await;
    let app = setup(warehouse, delivery).await;
    let (_, products) = seed_catalog(&app).await;
    checkout(&app, serde_json::json!([{"productId": products[0], "quantity": 1}])).await;

    let (status, body) = send(&app, empty_request("PUT", "/warehouse/order/ready/1")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["message"], "Failed to reach delivery service.");

    let (_, orders) = send(&app, empty_request("GET", "/order")).await;
    assert_eq!(orders[0]["state"], "PREPARING");
}

#[tokio::test]
async fn warehouse_ready_for_unknown_order_is_not_found() {
    let app = setup_happy().await;
    let (status, body) = send(&app, empty_request("PUT", "/warehouse/order/ready/42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order with id 42 not found");
}

#[tokio::test]
async fn full_lifecycle_to_delivered() {
    let app = setup_happy().await;
    let (_, products) = seed_catalog(&app).await;
    checkout(&app, serde_json::json!([{"productId": products[0], "quantity": 1}])).await;

    let (status, _) = send(&app, empty_request("PUT", "/warehouse/order/ready/1")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, empty_request("PUT", "/delivery/picked?orderId=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order has been picked successfully.");

    let (status, body) = send(&app, empty_request("PUT", "/delivery/completed?orderId=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "success");

    let (_, orders) = send(&app, empty_request("GET", "/order")).await;
    assert_eq!(orders[0]["state"], "DELIVERED");
}

#[tokio::test]
async fn failed_delivery_is_recorded() {
    let app = setup_happy().await;
    let (_, products) = seed_catalog(&app).await;
    checkout(&app, serde_json::json!([{"productId": products[0], "quantity": 1}])).await;
    send(&app, empty_request("PUT", "/warehouse/order/ready/1")).await;
    send(&app, empty_request("PUT", "/delivery/picked?orderId=1")).await;

    let (status, _) = send(&app, empty_request("PUT", "/delivery/failed?orderId=1")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, orders) = send(&app, empty_request("GET", "/order")).await;
    assert_eq!(orders[0]["state"], "FAILED");
}

#[tokio::test]
async fn lifecycle_out_of_order_conflicts() {
    let app = setup_happy().await;
    let (_, products) = seed_catalog(&app).await;
    checkout(&app, serde_json::json!([{"productId": products[0], "quantity": 1}])).await;

    // Completing an order that was never picked up is an illegal transition.
    let (status, _) = send(&app, empty_request("PUT", "/delivery/completed?orderId=1")).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // So is recording a pickup straight from PREPARING.
    let (status, _) = send(&app, empty_request("PUT", "/delivery/picked?orderId=1")).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn non_positive_order_id_is_a_bad_request() {
    let app = setup_happy().await;
    let (status, body) = send(&app, empty_request("PUT", "/delivery/picked?orderId=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Order id must be greater than 0");
}

#[tokio::test]
async fn admin_surface_manages_products() {
    let app = setup_happy().await;
    let (shop_id, products) = seed_catalog(&app).await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/shop/update/product/price",
            serde_json::json!({"id": products[0], "priceCents": 1500}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["priceCents"], 1500);

    let (status, _) = send(
        &app,
        empty_request("DELETE", &format!("/shop/delete/product?id={}", products[1])),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &app,
        empty_request("GET", &format!("/shop/{shop_id}/products")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listing = body.as_array().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0]["name"], "Widget");
}

#[tokio::test]
async fn admin_rejects_empty_product_name() {
    let app = setup_happy().await;
    let (shop_id, _) = seed_catalog(&app).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/shop/product/add",
            serde_json::json!({"name": "", "priceCents": 100, "shopId": shop_id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Product name cannot be empty");
}
