//! HTTP routes.

pub mod admin;
pub mod health;
pub mod location;
pub mod orders;
pub mod pricing;
pub mod products;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the API router with request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/location",
            get(location::store_location).post(location::estimate_delivery),
        )
        .route("/api/pricing/quote", post(pricing::quote))
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/api/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .route("/api/orders/{id}", get(orders::get_order))
        .route("/api/orders/{id}/status", put(orders::update_order_status))
        .route("/api/admin/analytics", get(admin::analytics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
