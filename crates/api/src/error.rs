//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog::CatalogError;
use order_store::StoreError;
use orchestrator::{CreateOrderFailure, OrchestratorError};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Orchestration error.
    Orchestrator(OrchestratorError),
    /// Catalog error from the admin surface.
    Catalog(CatalogError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Orchestrator(err) => orchestrator_error_to_response(err),
            ApiError::Catalog(err) => catalog_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn orchestrator_error_to_response(err: OrchestratorError) -> (StatusCode, String) {
    let status = match &err {
        OrchestratorError::Validation(_) => StatusCode::BAD_REQUEST,
        OrchestratorError::OrderNotFound(_)
        | OrchestratorError::ProductNotFound(_)
        | OrchestratorError::WarehouseNotFound(_) => StatusCode::NOT_FOUND,
        OrchestratorError::IllegalState(_) => StatusCode::CONFLICT,
        OrchestratorError::CreateOrder {
            source: CreateOrderFailure::InsufficientStock,
        } => StatusCode::CONFLICT,
        OrchestratorError::CreateOrder {
            source: CreateOrderFailure::RetriesExhausted { .. },
        } => StatusCode::BAD_GATEWAY,
        OrchestratorError::Remote(_) | OrchestratorError::PickupNotConfirmed { .. } => {
            StatusCode::BAD_GATEWAY
        }
        OrchestratorError::Store(StoreError::VersionConflict { .. }) => StatusCode::CONFLICT,
        OrchestratorError::Store(_) | OrchestratorError::Internal(_) => {
            tracing::error!(error = %err, "orchestration failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string())
}

fn catalog_error_to_response(err: CatalogError) -> (StatusCode, String) {
    let status = match &err {
        CatalogError::ProductNotFound(_)
        | CatalogError::ShopNotFound(_)
        | CatalogError::WarehouseNotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
    };
    (status, err.to_string())
}

impl From<OrchestratorError> for ApiError {
    fn from(err: OrchestratorError) -> Self {
        ApiError::Orchestrator(err)
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}
