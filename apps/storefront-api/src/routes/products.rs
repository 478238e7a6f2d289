//! # Product Catalog Routes
//!
//! ```text
//! GET    /api/products?category=grocery&search=chiya&minPrice=50&page=1&limit=10
//! POST   /api/products            NewProduct  → 201 Product
//! GET    /api/products/{id}                   → Product
//! PUT    /api/products/{id}       ProductUpdate → Product
//! DELETE /api/products/{id}                   → { message }
//! ```

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pasal_core::{Category, Money, NewProduct, Product, ProductUpdate, ValidationError};
use pasal_store::{PageInfo, Pagination, ProductFilter};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

/// Query string for `GET /api/products`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<Category>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub in_stock: Option<bool>,
}

impl ProductQuery {
    fn filter(&self) -> Result<ProductFilter, ValidationError> {
        Ok(ProductFilter {
            category: self.category,
            search: self.search.clone(),
            min_price: query_price("minPrice", self.min_price)?,
            max_price: query_price("maxPrice", self.max_price)?,
            in_stock_only: self.in_stock.unwrap_or(false),
        })
    }
}

fn query_price(field: &str, value: Option<f64>) -> Result<Option<Money>, ValidationError> {
    value
        .map(|v| {
            Money::from_f64(v)
                .filter(|m| !m.is_negative())
                .ok_or_else(|| ValidationError::OutOfRange {
                    field: field.to_string(),
                    min: "0".to_string(),
                    max: "unbounded".to_string(),
                })
        })
        .transpose()
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub pagination: PageInfo,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub id: String,
}

pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> ApiResult<Json<ProductListResponse>> {
    let Query(query) = query?;
    let filter = query.filter()?;
    let pagination = Pagination::new(query.page, query.limit)?;

    let page = state.store.products().list(&filter, pagination).await?;
    Ok(Json(ProductListResponse {
        products: page.items,
        pagination: page.pagination,
    }))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.store.products().get(&id).await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let product = state.store.products().create(new).await?;
    info!(id = %product.id, name = %product.name_en, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<ProductUpdate>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.store.products().update(&id, update).await?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let removed = state.store.products().delete(&id).await?;
    info!(id = %removed.id, "Product deleted");
    Ok(Json(DeleteResponse {
        message: "Product deleted successfully".to_string(),
        id: removed.id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_to_filter() {
        let query = ProductQuery {
            category: Some(Category::Grocery),
            min_price: Some(50.0),
            max_price: Some(150.5),
            in_stock: Some(true),
            ..Default::default()
        };
        let filter = query.filter().unwrap();
        assert_eq!(filter.category, Some(Category::Grocery));
        assert_eq!(filter.min_price, Some(Money::from_rupees(50)));
        assert_eq!(filter.max_price, Some(Money::from_paisa(15050)));
        assert!(filter.in_stock_only);
    }

    #[test]
    fn test_negative_price_filter_rejected() {
        let query = ProductQuery {
            min_price: Some(-1.0),
            ..Default::default()
        };
        assert!(query.filter().is_err());
    }
}
