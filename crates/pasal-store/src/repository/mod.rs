//! # Repository Module
//!
//! In-memory repository implementations for the Pasal storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                           │
//! │       │                                                                 │
//! │       │  store.products().list(&filter, page)                          │
//! │       ▼                                                                 │
//! │  ProductRepository / OrderRepository                                   │
//! │       │                                                                 │
//! │       │  Arc<RwLock<Vec<T>>>: many readers, one writer                 │
//! │       ▼                                                                 │
//! │  Process memory (lost on restart)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog CRUD, filtering, stock
//! - [`OrderRepository`](order::OrderRepository) - Order storage and status updates

use pasal_core::ValidationError;
use serde::{Deserialize, Serialize};

pub mod order;
pub mod product;

/// Default page size for listings.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: u32 = 100;

// =============================================================================
// Pagination
// =============================================================================

/// A validated page request. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Builds a page request, defaulting missing values to page 1 of 10.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Result<Self, ValidationError> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);

        if page == 0 {
            return Err(ValidationError::MustBePositive {
                field: "page".to_string(),
            });
        }
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(ValidationError::OutOfRange {
                field: "limit".to_string(),
                min: "1".to_string(),
                max: MAX_PAGE_SIZE.to_string(),
            });
        }
        Ok(Pagination { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    fn offset(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }

    /// Cuts one page out of an already-filtered list.
    pub fn slice<T>(&self, items: Vec<T>) -> Page<T> {
        let total = items.len();
        let items = items
            .into_iter()
            .skip(self.offset())
            .take(self.limit as usize)
            .collect();

        Page {
            items,
            pagination: PageInfo {
                page: self.page,
                limit: self.limit,
                total,
                total_pages: total.div_ceil(self.limit as usize),
            },
        }
    }
}

/// Pagination metadata returned with every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub total_pages: usize,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}
