//! Catalog products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{Cents, ProductCategory, ProductId};

/// Stock level given to products created without an explicit quantity.
pub const DEFAULT_STOCK_QUANTITY: u32 = 30;

const fn default_quantity() -> u32 {
    DEFAULT_STOCK_QUANTITY
}

/// A product in the catalog.
///
/// Products are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub short_description: Option<String>,
    pub price: Cents,
    pub sale_price: Option<Cents>,
    pub category: ProductCategory,
    pub image_url: String,
    pub ingredients: Option<String>,
    pub benefits: Vec<String>,
    pub featured: bool,
    pub best_seller: bool,
    pub in_stock: bool,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Price charged per unit: the sale price when one is set.
    #[must_use]
    pub fn unit_price(&self) -> Cents {
        self.sale_price.unwrap_or(self.price)
    }
}

/// Insert schema for a product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Slug is required"))]
    pub slug: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(default)]
    pub short_description: Option<String>,
    pub price: Cents,
    #[serde(default)]
    pub sale_price: Option<Cents>,
    pub category: ProductCategory,
    #[validate(length(min = 1, message = "Image URL is required"))]
    pub image_url: String,
    #[serde(default)]
    pub ingredients: Option<String>,
    pub benefits: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub best_seller: bool,
    #[serde(default = "super::default_true")]
    pub in_stock: bool,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl NewProduct {
    /// Build the stored record under an assigned id.
    #[must_use]
    pub fn into_record(self, id: ProductId, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            short_description: self.short_description,
            price: self.price,
            sale_price: self.sale_price,
            category: self.category,
            image_url: self.image_url,
            ingredients: self.ingredients,
            benefits: self.benefits,
            featured: self.featured,
            best_seller: self.best_seller,
            in_stock: self.in_stock,
            quantity: self.quantity,
            created_at,
        }
    }
}
