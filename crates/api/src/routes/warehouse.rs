//! Warehouse-facing trigger: the order is assembled and ready.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::OrderId;
use order_store::OrderStore;
use serde::Serialize;

use crate::error::ApiError;
use crate::routes::orders::AppState;

#[derive(Serialize)]
pub struct ReadyResponse {
    pub message: &'static str,
}

/// PUT /warehouse/order/ready/{order_id} — the warehouse finished
/// assembling; hand the order to the delivery service.
///
/// A business-level refusal from the delivery service answers 503, not an
/// error body: the order stays in `PREPARING` and the warehouse may retry.
#[tracing::instrument(skip(state))]
pub async fn order_ready<S: OrderStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(order_id): Path<i64>,
) -> Result<(StatusCode, Json<ReadyResponse>), ApiError> {
    let dispatched = state
        .orchestrator
        .mark_warehouse_ready(OrderId::new(order_id))
        .await?;

    if dispatched {
        Ok((
            StatusCode::OK,
            Json(ReadyResponse {
                message: "Delivery service was reached successfully.",
            }),
        ))
    } else {
        Ok((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyResponse {
                message: "Failed to reach delivery service.",
            }),
        ))
    }
}
