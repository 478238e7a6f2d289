//! Storefront API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | variable                        | default              |
//! |---------------------------------|----------------------|
//! | `PASAL_HOST`                    | `0.0.0.0`            |
//! | `PASAL_PORT`                    | `3001`               |
//! | `PASAL_STORE_NAME`              | `नबिन निर्मल स्टोर`     |
//! | `PASAL_STORE_LAT` / `_LNG`      | `27.8742` / `83.4534` |
//! | `PASAL_FREE_SHIPPING_THRESHOLD` | `2000`               |
//! | `PASAL_FALLBACK_DELIVERY_FEE`   | `100`                |
//! | `PASAL_SEED_CATALOG`            | `true`               |
//! | `PASAL_CORS_PERMISSIVE`         | `true`               |

use std::env;
use std::str::FromStr;

use pasal_core::{Coordinate, DeliveryFeePolicy, Money, StoreLocation};

/// Storefront API configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// The shop deliveries start from
    pub store: StoreLocation,

    /// Free delivery strictly above this subtotal
    pub free_shipping_threshold: Money,

    /// Delivery fee when the customer shares no location
    pub fallback_delivery_fee: Money,

    /// Load the six demo products at startup
    pub seed_catalog: bool,

    /// Allow any origin (the storefront client is served separately)
    pub cors_permissive: bool,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        let policy = DeliveryFeePolicy::default();
        StorefrontConfig {
            host: "0.0.0.0".to_string(),
            port: 3001,
            store: StoreLocation::default(),
            free_shipping_threshold: policy.free_shipping_threshold,
            fallback_delivery_fee: policy.fallback_fee,
            seed_catalog: true,
            cors_permissive: true,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn load_from<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = StorefrontConfig::default();

        let mut store = defaults.store;
        if let Some(name) = var("PASAL_STORE_NAME").filter(|n| !n.trim().is_empty()) {
            store.name = name;
        }
        store.coordinates = Coordinate::new(
            parse_or(&var, "PASAL_STORE_LAT", store.coordinates.latitude)?,
            parse_or(&var, "PASAL_STORE_LNG", store.coordinates.longitude)?,
        )
        .map_err(|e| ConfigError::InvalidStoreLocation(e.to_string()))?;

        let config = StorefrontConfig {
            host: var("PASAL_HOST").unwrap_or(defaults.host),
            port: parse_or(&var, "PASAL_PORT", defaults.port)?,
            store,
            free_shipping_threshold: money_or(
                &var,
                "PASAL_FREE_SHIPPING_THRESHOLD",
                defaults.free_shipping_threshold,
            )?,
            fallback_delivery_fee: money_or(
                &var,
                "PASAL_FALLBACK_DELIVERY_FEE",
                defaults.fallback_delivery_fee,
            )?,
            seed_catalog: parse_or(&var, "PASAL_SEED_CATALOG", defaults.seed_catalog)?,
            cors_permissive: parse_or(&var, "PASAL_CORS_PERMISSIVE", defaults.cors_permissive)?,
        };

        Ok(config)
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn delivery_policy(&self) -> DeliveryFeePolicy {
        DeliveryFeePolicy::new(self.free_shipping_threshold, self.fallback_delivery_fee)
    }
}

fn parse_or<F, T>(var: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        None => Ok(default),
    }
}

fn money_or<F>(var: &F, name: &str, default: Money) -> Result<Money, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = var(name) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(Money::from_f64)
        .filter(|m| !m.is_negative())
        .ok_or_else(|| ConfigError::InvalidValue(name.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid store location: {0}")]
    InvalidStoreLocation(String),
}
