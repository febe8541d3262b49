//! # Product Routes
//!
//! Catalog endpoints: list products and fetch one by business code.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;
use till_core::Product;

/// Wire representation of a catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub code: String,
    pub name: String,
    pub unit_price: i64,
    pub stock: i64,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        ProductDto {
            code: product.code,
            name: product.name,
            unit_price: product.unit_price_cents,
            stock: product.stock,
        }
    }
}

/// `GET /products` - the full catalog, ordered.
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductDto>>, ApiError> {
    debug!("list_products");

    let products = state.db.products().list().await?;

    Ok(Json(products.into_iter().map(ProductDto::from).collect()))
}

/// `GET /products/{code}` - one product by business code, or 404.
pub async fn get_product(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ProductDto>, ApiError> {
    debug!(code = %code, "get_product");

    let product = state
        .db
        .products()
        .find_by_code(&code)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &code))?;

    Ok(Json(product.into()))
}
