//! Delivery-facing triggers: pickup and terminal outcomes.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use common::OrderId;
use order_store::OrderStore;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::routes::orders::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderIdParam {
    pub order_id: i64,
}

#[derive(Serialize)]
pub struct DeliveryResponse {
    pub message: &'static str,
}

/// PUT /delivery/picked?orderId= — a courier collected the order.
#[tracing::instrument(skip(state))]
pub async fn picked<S: OrderStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<OrderIdParam>,
) -> Result<(StatusCode, Json<DeliveryResponse>), ApiError> {
    let confirmed = state
        .orchestrator
        .mark_picked_up(OrderId::new(params.order_id))
        .await?;

    if confirmed {
        Ok((
            StatusCode::OK,
            Json(DeliveryResponse {
                message: "Order has been picked successfully.",
            }),
        ))
    } else {
        Ok((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(DeliveryResponse {
                message: "Failed to update the order status.",
            }),
        ))
    }
}

/// PUT /delivery/completed?orderId= — the order reached the client.
#[tracing::instrument(skip(state))]
pub async fn completed<S: OrderStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<OrderIdParam>,
) -> Result<Json<DeliveryResponse>, ApiError> {
    state
        .orchestrator
        .mark_delivered(OrderId::new(params.order_id))
        .await?;
    Ok(Json(DeliveryResponse { message: "success" }))
}

/// PUT /delivery/failed?orderId= — the delivery failed.
#[tracing::instrument(skip(state))]
pub async fn failed<S: OrderStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<OrderIdParam>,
) -> Result<Json<DeliveryResponse>, ApiError> {
    state
        .orchestrator
        .mark_failed(OrderId::new(params.order_id))
        .await?;
    Ok(Json(DeliveryResponse { message: "success" }))
}
