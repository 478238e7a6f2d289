//! # Store Location & Delivery Lookup
//!
//! `GET /api/location` returns the shop; `POST /api/location` prices delivery
//! to a customer coordinate.
//!
//! ```text
//! POST /api/location
//! { "customerLocation": { "coordinates": { "lat": 27.8742, "lng": 83.4534 } } }
//!
//! 200
//! { "distance": 0.0, "deliveryFee": 50, "estimatedTime": "1–2 hours",
//!   "estimatedTimeNe": "१-२ घण्टा", "band": "nearby", "storeLocation": { .. } }
//! ```
//!
//! The fee here is the raw band fee: free shipping depends on the cart, so it
//! is applied by `/api/pricing/quote` and order placement.

use axum::extract::State;
use axum::Json;
use pasal_core::{Coordinate, DeliveryBand, DeliveryEstimator, Locale, Money, StoreLocation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

/// A customer position as the storefront's location tracker posts it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerLocation {
    pub coordinates: Coordinate,
    /// Entered by hand rather than from device geolocation.
    #[serde(default)]
    pub is_manual: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRequest {
    pub customer_location: CustomerLocation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    /// Kilometres, 2 decimal places.
    pub distance: f64,
    pub delivery_fee: Money,
    pub estimated_time: &'static str,
    pub estimated_time_ne: &'static str,
    pub band: DeliveryBand,
    pub store_location: StoreLocation,
}

pub async fn store_location(State(state): State<AppState>) -> Json<StoreLocation> {
    Json(state.store_location.as_ref().clone())
}

pub async fn estimate_delivery(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LocationRequest>,
) -> ApiResult<Json<LocationResponse>> {
    let customer = request.customer_location;
    let estimate = DeliveryEstimator::new().estimate(state.pricing.store(), customer.coordinates)?;

    debug!(
        distance_km = estimate.distance_km,
        band = ?estimate.band,
        manual = customer.is_manual,
        "Delivery estimated"
    );

    Ok(Json(LocationResponse {
        distance: estimate.distance_km,
        delivery_fee: estimate.fee,
        estimated_time: estimate.time_label(Locale::English),
        estimated_time_ne: estimate.time_label(Locale::Nepali),
        band: estimate.band,
        store_location: state.store_location.as_ref().clone(),
    }))
}
