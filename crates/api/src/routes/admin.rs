//! Shop and product administration endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use catalog::{Money, Product, Shop};
use common::{ProductId, ShopId};
use order_store::OrderStore;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::routes::orders::AppState;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateShopRequest {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProductRequest {
    pub name: String,
    pub price_cents: i64,
    pub shop_id: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPriceRequest {
    pub id: i64,
    pub price_cents: i64,
}

#[derive(Debug, Deserialize)]
pub struct ProductIdParam {
    pub id: i64,
}

// -- Response types --

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub price_cents: i64,
    pub shop_id: i64,
}

impl From<Shop> for ShopResponse {
    fn from(shop: Shop) -> Self {
        Self {
            id: shop.id.get(),
            name: shop.name,
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.get(),
            name: product.name,
            price_cents: product.price.cents(),
            shop_id: product.shop_id.get(),
        }
    }
}

// -- Handlers --

/// POST /shop — register a shop.
#[tracing::instrument(skip(state, req))]
pub async fn create_shop<S: OrderStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateShopRequest>,
) -> Result<(StatusCode, Json<ShopResponse>), ApiError> {
    let shop = state.catalog.create_shop(req.name)?;
    Ok((StatusCode::CREATED, Json(shop.into())))
}

/// POST /shop/product/add — register a product.
#[tracing::instrument(skip(state, req))]
pub async fn create_product<S: OrderStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<SaveProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let product = state.catalog.create_product(
        req.name,
        Money::from_cents(req.price_cents),
        ShopId::new(req.shop_id),
    )?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// PUT /shop/update/product/price — replace a product's price.
#[tracing::instrument(skip(state, req))]
pub async fn update_product_price<S: OrderStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<UpdateProductPriceRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .catalog
        .update_product_price(ProductId::new(req.id), Money::from_cents(req.price_cents))?;
    Ok(Json(product.into()))
}

/// DELETE /shop/delete/product?id= — remove a product.
#[tracing::instrument(skip(state))]
pub async fn delete_product<S: OrderStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<ProductIdParam>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete_product(ProductId::new(params.id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /shop/{shop_id}/products — list a shop's products.
#[tracing::instrument(skip(state))]
pub async fn list_products<S: OrderStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(shop_id): Path<i64>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state.catalog.products_by_shop(ShopId::new(shop_id))?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}
