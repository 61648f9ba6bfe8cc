//! Article route handlers.
//!
//! ```text
//! GET  /api/articles                      - All articles
//! GET  /api/articles/featured             - Featured articles
//! GET  /api/articles/category/{category}  - Articles in a category
//! GET  /api/articles/{slug}               - Single article
//! POST /api/articles                      - Create an article
//! ```

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sleepwell_core::ArticleCategory;
use sleepwell_core::models::{Article, NewArticle};
use tracing::instrument;

use crate::error::{AppError, Result, StorageContext};
use crate::extract::ValidatedJson;
use crate::state::AppState;
use crate::storage::StorageError;

#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Article>>> {
    let articles = state
        .storage()
        .articles()
        .context("Failed to fetch articles")?;
    Ok(Json(articles))
}

#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Result<Json<Vec<Article>>> {
    let articles = state
        .storage()
        .featured_articles()
        .context("Failed to fetch featured articles")?;
    Ok(Json(articles))
}

/// Unknown categories match nothing.
#[instrument(skip(state))]
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Article>>> {
    let Ok(category) = category.parse::<ArticleCategory>() else {
        return Ok(Json(Vec::new()));
    };

    let articles = state
        .storage()
        .articles_by_category(category)
        .context("Failed to fetch articles by category")?;
    Ok(Json(articles))
}

#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<Article>> {
    state
        .storage()
        .article_by_slug(&slug)
        .context("Failed to fetch article")?
        .map(Json)
        .ok_or(AppError::NotFound("Article not found"))
}

#[instrument(skip(state, article), fields(slug = %article.slug))]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(article): ValidatedJson<NewArticle>,
) -> Result<(StatusCode, Json<Article>)> {
    let storage = state.storage();

    if storage
        .article_by_slug(&article.slug)
        .context("Failed to create article")?
        .is_some()
    {
        return Err(AppError::BadRequest("Slug already exists".to_string()));
    }

    let article = match storage.create_article(article) {
        Ok(article) => article,
        Err(StorageError::Conflict(message)) => return Err(AppError::BadRequest(message)),
        Err(source) => {
            return Err(AppError::Storage {
                message: "Failed to create article",
                source,
            });
        }
    };
    tracing::info!(article_id = %article.id, "Article created");

    Ok((StatusCode::CREATED, Json(article)))
}
