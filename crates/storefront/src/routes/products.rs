//! Product catalog route handlers.
//!
//! ```text
//! GET  /api/products                      - All products
//! GET  /api/products/featured             - Featured products
//! GET  /api/products/bestsellers          - Best sellers
//! GET  /api/products/category/{category}  - Products in a category
//! GET  /api/products/{slug}               - Single product
//! POST /api/products                      - Create a product
//! ```

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sleepwell_core::ProductCategory;
use sleepwell_core::models::{NewProduct, Product};
use tracing::instrument;

use crate::error::{AppError, Result, StorageContext};
use crate::extract::ValidatedJson;
use crate::state::AppState;
use crate::storage::StorageError;

/// List every product.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state
        .storage()
        .products()
        .context("Failed to fetch products")?;
    Ok(Json(products))
}

/// List featured products.
#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state
        .storage()
        .featured_products()
        .context("Failed to fetch featured products")?;
    Ok(Json(products))
}

/// List best sellers.
#[instrument(skip(state))]
pub async fn best_sellers(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state
        .storage()
        .best_seller_products()
        .context("Failed to fetch bestseller products")?;
    Ok(Json(products))
}

/// List products in a category. Unknown categories match nothing.
#[instrument(skip(state))]
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Product>>> {
    let Ok(category) = category.parse::<ProductCategory>() else {
        return Ok(Json(Vec::new()));
    };

    let products = state
        .storage()
        .products_by_category(category)
        .context("Failed to fetch products by category")?;
    Ok(Json(products))
}

/// Show a single product by slug.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<Product>> {
    state
        .storage()
        .product_by_slug(&slug)
        .context("Failed to fetch product")?
        .map(Json)
        .ok_or(AppError::NotFound("Product not found"))
}

/// Create a product.
#[instrument(skip(state, product), fields(slug = %product.slug))]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(product): ValidatedJson<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    let storage = state.storage();

    if storage
        .product_by_slug(&product.slug)
        .context("Failed to create product")?
        .is_some()
    {
        return Err(AppError::BadRequest("Slug already exists".to_string()));
    }

    let product = match storage.create_product(product) {
        Ok(product) => product,
        Err(StorageError::Conflict(message)) => return Err(AppError::BadRequest(message)),
        Err(source) => {
            return Err(AppError::Storage {
                message: "Failed to create product",
                source,
            });
        }
    };
    tracing::info!(product_id = %product.id, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}
