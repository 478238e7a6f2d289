//! Cart pricing for the cart and checkout screens.
//!
//! Recomputed by the client whenever the cart or location changes; the
//! latest response wins.

use axum::extract::State;
use axum::Json;
use pasal_core::{Cart, CartLineItem, Quote, CURRENCY_PREFIX, TAX_LABEL};
use serde::{Deserialize, Serialize};

use crate::error::{ApiJson, ApiResult};
use crate::routes::location::CustomerLocation;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(default)]
    pub items: Vec<CartLineItem>,
    #[serde(default)]
    pub customer_location: Option<CustomerLocation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub quote: Quote,
    /// Total units across all lines.
    pub item_count: u32,
    pub tax_label: &'static str,
    pub currency: &'static str,
}

/// `POST /api/pricing/quote`
pub async fn quote(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<QuoteRequest>,
) -> ApiResult<Json<QuoteResponse>> {
    let cart = Cart::from_line_items(request.items)?;
    let quote = state.pricing.quote(
        cart.line_items(),
        request.customer_location.map(|l| l.coordinates),
    )?;

    Ok(Json(QuoteResponse {
        quote,
        item_count: cart.item_count(),
        tax_label: TAX_LABEL,
        currency: CURRENCY_PREFIX,
    }))
}
