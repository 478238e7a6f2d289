//! # pasal-store: Storage Layer for the Pasal storefront
//!
//! Explicit, in-process storage for the product catalog and placed orders.
//! There is no database: everything lives behind `tokio::sync::RwLock`s
//! owned by a [`Store`] handle that the HTTP app clones into its state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pasal Data Flow                                  │
//! │                                                                         │
//! │  axum handler (POST /api/orders)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   pasal-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Store      │    │  Repositories │    │    Seed      │  │   │
//! │  │   │  (store.rs)   │    │ (product.rs)  │    │  (seed.rs)   │  │   │
//! │  │   │               │    │ (order.rs)    │    │              │  │   │
//! │  │   │ place_order() │───►│ reserve()     │    │ demo-1..6    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pasal-core (pricing, validation, status workflow)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pasal_store::{ProductFilter, Pagination, Store};
//!
//! let store = Store::seeded().await?;
//! let page = store.products().list(&ProductFilter::default(), Pagination::default()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use store::Store;

pub use repository::order::{OrderFilter, OrderRepository};
pub use repository::product::{ProductFilter, ProductRepository};
pub use repository::{Page, PageInfo, Pagination};
