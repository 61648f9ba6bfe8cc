//! Catalog seed data.
//!
//! The JSON files under `crates/storefront/seed/` are embedded at compile time
//! and inserted through the normal create path when the server starts, so
//! seeded records get ids and timestamps exactly like API-created ones.
//! Every record is validated against its insert schema first.

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;
use validator::Validate;

use sleepwell_core::models::{NewArticle, NewFaq, NewProduct, NewTestimonial};
use sleepwell_core::validation::describe;

use super::{MemStorage, Storage, StorageError};

const PRODUCTS: &str = include_str!("../../seed/products.json");
const ARTICLES: &str = include_str!("../../seed/articles.json");
const TESTIMONIALS: &str = include_str!("../../seed/testimonials.json");
const FAQS: &str = include_str!("../../seed/faqs.json");

/// Errors that can occur while loading seed data.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid record in {file}: {message}")]
    Invalid { file: &'static str, message: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Counts of records inserted by [`seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub products: usize,
    pub articles: usize,
    pub testimonials: usize,
    pub faqs: usize,
}

impl MemStorage {
    /// Create a store pre-loaded with the catalog seed data.
    ///
    /// # Errors
    ///
    /// Returns `SeedError` if the embedded seed files are malformed.
    pub fn seeded() -> Result<Self, SeedError> {
        let store = Self::new();
        seed(&store)?;
        Ok(store)
    }
}

/// Insert the seed products, articles, testimonials and FAQs into `store`.
///
/// Users, carts, orders and newsletter subscriptions are never seeded.
///
/// # Errors
///
/// Returns `SeedError` if a seed file fails to parse or validate, or if the
/// store rejects a write.
pub fn seed(store: &dyn Storage) -> Result<SeedSummary, SeedError> {
    let products: Vec<NewProduct> = parse("products.json", PRODUCTS)?;
    let articles: Vec<NewArticle> = parse("articles.json", ARTICLES)?;
    let testimonials: Vec<NewTestimonial> = parse("testimonials.json", TESTIMONIALS)?;
    let faqs: Vec<NewFaq> = parse("faqs.json", FAQS)?;

    let summary = SeedSummary {
        products: products.len(),
        articles: articles.len(),
        testimonials: testimonials.len(),
        faqs: faqs.len(),
    };

    for product in products {
        store.create_product(product)?;
    }
    for article in articles {
        store.create_article(article)?;
    }
    for testimonial in testimonials {
        store.create_testimonial(testimonial)?;
    }
    for faq in faqs {
        store.create_faq(faq)?;
    }

    info!(
        products = summary.products,
        articles = summary.articles,
        testimonials = summary.testimonials,
        faqs = summary.faqs,
        "Seed data loaded"
    );
    Ok(summary)
}

fn parse<T>(file: &'static str, json: &str) -> Result<Vec<T>, SeedError>
where
    T: DeserializeOwned + Validate,
{
    let records: Vec<T> =
        serde_json::from_str(json).map_err(|source| SeedError::Parse { file, source })?;
    for record in &records {
        record.validate().map_err(|e| SeedError::Invalid {
            file,
            message: describe(&e),
        })?;
    }
    Ok(records)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sleepwell_core::{Cents, ProductCategory, ProductId};

    #[test]
    fn test_seed_counts() {
        let store = MemStorage::new();
        let summary = seed(&store).unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                products: 3,
                articles: 3,
                testimonials: 3,
                faqs: 5
            }
        );
        assert!(store.cart_by_session("anything").unwrap().is_none());
    }

    #[test]
    fn test_seeded_catalog() {
        let store = MemStorage::seeded().unwrap();

        let first = store.product(ProductId::new(1)).unwrap().unwrap();
        assert_eq!(first.slug, "formula-sonno-trim");
        assert!(first.featured && first.best_seller);

        let bundle = store.product_by_slug("bundle-sonno-relax").unwrap().unwrap();
        assert_eq!(bundle.category, ProductCategory::Bundles);
        assert_eq!(bundle.unit_price(), Cents::new(5999));
        assert_eq!(bundle.quantity, 60);

        assert_eq!(store.featured_articles().unwrap().len(), 3);
        assert_eq!(store.featured_testimonials().unwrap().len(), 3);

        let orders: Vec<i32> = store.faqs().unwrap().iter().map(|f| f.order).collect();
        assert_eq!(orders, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_invalid_seed_is_reported() {
        let result: Result<Vec<NewFaq>, _> = parse("faqs.json", r#"[{"question": "", "answer": "a"}]"#);
        assert!(matches!(result, Err(SeedError::Invalid { file: "faqs.json", .. })));

        let result: Result<Vec<NewFaq>, _> = parse("faqs.json", "not json");
        assert!(matches!(result, Err(SeedError::Parse { .. })));
    }
}
