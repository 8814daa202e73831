//! Checkout and order listing endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use catalog::MemoryCatalog;
use common::ProductId;
use domain::Order;
use order_store::OrderStore;
use orchestrator::{
    CheckoutItem, CheckoutRequest, HttpDeliveryDispatcher, HttpPickupNotifier, HttpStockVerifier,
    OrderOrchestrator,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: OrderStore> {
    pub orchestrator: OrderOrchestrator<
        S,
        MemoryCatalog,
        HttpStockVerifier,
        HttpDeliveryDispatcher,
        HttpPickupNotifier,
    >,
    pub catalog: Arc<MemoryCatalog>,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CheckoutCartRequest {
    pub direction: String,
    pub products: Vec<ProductQuantity>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuantity {
    pub product_id: i64,
    pub quantity: i64,
}

// -- Response types --

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: i64,
    pub direction: String,
    pub state: String,
    pub warehouse_id: i64,
    pub products: Vec<OrderLineResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineResponse {
    pub product_id: i64,
    pub quantity: u32,
}

impl OrderResponse {
    fn from_order(order: &Order) -> Self {
        Self {
            order_id: order.id().map(|id| id.get()).unwrap_or_default(),
            direction: order.address().to_string(),
            state: order.state().to_string(),
            warehouse_id: order.warehouse_id().get(),
            products: order
                .lines()
                .iter()
                .map(|line| OrderLineResponse {
                    product_id: line.product_id.get(),
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

// -- Handlers --

/// POST /order/checkout — create an order from a cart.
#[tracing::instrument(skip(state, req))]
pub async fn checkout<S: OrderStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CheckoutCartRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let request = CheckoutRequest {
        address: req.direction,
        items: req
            .products
            .iter()
            .map(|p| CheckoutItem {
                product_id: ProductId::new(p.product_id),
                // Negative quantities are folded to 0 so the orchestrator
                // rejects them with its own validation message.
                quantity: u32::try_from(p.quantity).unwrap_or(0),
            })
            .collect(),
    };

    let order = state.orchestrator.create_order(request).await?;
    Ok((StatusCode::CREATED, Json(OrderResponse::from_order(&order))))
}

/// GET /order — list all orders.
#[tracing::instrument(skip(state))]
pub async fn list<S: OrderStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state.orchestrator.all_orders().await?;
    Ok(Json(orders.iter().map(OrderResponse::from_order).collect()))
}
