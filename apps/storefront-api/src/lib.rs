//! # Pasal Storefront API
//!
//! axum HTTP server behind the storefront's product, cart, location and
//! checkout screens.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront API Server                              │
//! │                                                                         │
//! │  Browser ───► HTTP (3001) ───► routes ───► pasal-store ───► RwLock<Vec> │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                         pasal-core CheckoutPricing                      │
//! │                  (Haversine bands, fee policy, 13% VAT)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`router`] is exposed so tests can drive the full stack in-process.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ConfigError, StorefrontConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::router;
pub use state::AppState;
