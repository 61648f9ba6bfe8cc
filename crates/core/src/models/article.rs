//! Editorial articles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{ArticleCategory, ArticleId};

/// A published article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub summary: String,
    pub category: ArticleCategory,
    pub author: String,
    pub author_title: Option<String>,
    pub image_url: String,
    /// Estimated reading time in minutes.
    pub read_time: u32,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert schema for an article.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Slug is required"))]
    pub slug: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    #[validate(length(min = 1, message = "Summary is required"))]
    pub summary: String,
    pub category: ArticleCategory,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[serde(default)]
    pub author_title: Option<String>,
    #[validate(length(min = 1, message = "Image URL is required"))]
    pub image_url: String,
    #[validate(range(min = 1, message = "Read time must be at least 1 minute"))]
    pub read_time: u32,
    #[serde(default)]
    pub featured: bool,
}

impl NewArticle {
    /// Build the stored record under an assigned id.
    #[must_use]
    pub fn into_record(self, id: ArticleId, created_at: DateTime<Utc>) -> Article {
        Article {
            id,
            title: self.title,
            slug: self.slug,
            content: self.content,
            summary: self.summary,
            category: self.category,
            author: self.author,
            author_title: self.author_title,
            image_url: self.image_url,
            read_time: self.read_time,
            featured: self.featured,
            created_at,
        }
    }
}
