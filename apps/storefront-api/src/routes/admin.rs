//! # Admin Routes
//!
//! ```text
//! GET /api/admin/analytics → StoreAnalytics
//! ```

use axum::extract::State;
use axum::Json;
use pasal_core::StoreAnalytics;

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn analytics(State(state): State<AppState>) -> ApiResult<Json<StoreAnalytics>> {
    Ok(Json(state.store.analytics().await?))
}
