//! # Order Routes
//!
//! ```text
//! GET  /api/orders?customerId=cust-1&status=pending&search=sita → [Order] newest first
//! POST /api/orders          OrderRequest              → 201 Order
//! GET  /api/orders/{id}     (UUID or ORD- number)     → Order
//! PUT  /api/orders/{id}/status  { "status": "shipped" } → Order
//! ```
//!
//! Totals in the request body are ignored; the order is priced again from
//! the catalog, the customer location and the store's fee policy.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pasal_core::{Order, OrderRequest, OrderStatus};
use pasal_store::OrderFilter;
use serde::Deserialize;
use tracing::info;

use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    pub customer_id: Option<String>,
    pub status: Option<OrderStatus>,
    pub search: Option<String>,
}

impl From<OrderQuery> for OrderFilter {
    fn from(query: OrderQuery) -> Self {
        OrderFilter {
            customer_id: query.customer_id,
            status: query.status,
            search: query.search,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

pub async fn list_orders(
    State(state): State<AppState>,
    query: Result<Query<OrderQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Order>>> {
    let Query(query) = query?;
    let orders = state.store.orders().list(&query.into()).await?;
    Ok(Json(orders))
}

pub async fn create_order(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<OrderRequest>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let order = state.store.place_order(&state.pricing, request).await?;
    info!(
        order_number = %order.order_number,
        items = order.item_count(),
        total = %order.pricing.total,
        "Order received"
    );
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.store.orders().get(&id).await?))
}

pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<StatusUpdate>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.store.orders().update_status(&id, update.status).await?))
}
