//! Shared handler state.

use std::sync::Arc;

use pasal_core::{CheckoutPricing, StoreLocation};
use pasal_store::Store;

use crate::config::StorefrontConfig;

/// Cloned into every handler; all fields are cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Store,
    pub pricing: CheckoutPricing,
    pub store_location: Arc<StoreLocation>,
}

impl AppState {
    pub fn new(config: &StorefrontConfig, store: Store) -> Self {
        AppState {
            store,
            pricing: CheckoutPricing::new(config.store.coordinates, config.delivery_policy()),
            store_location: Arc::new(config.store.clone()),
        }
    }
}
