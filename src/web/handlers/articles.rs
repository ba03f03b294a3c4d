//! Article handlers.

use axum::{extract::State, Json};

use crate::web::dto::{LoadArticlesQuery, LoadArticlesResponse, ValidatedQuery};
use crate::web::error::ApiError;
use crate::web::handlers::SharedState;

/// GET /loadArticles - Load the next page of articles.
///
/// Pages are keyed by `cursor`, the id of the last article the client has
/// seen. `category` and `title` narrow the page by substring match.
pub async fn load_articles(
    State(state): State<SharedState>,
    ValidatedQuery(query): ValidatedQuery<LoadArticlesQuery>,
) -> Result<Json<LoadArticlesResponse>, ApiError> {
    let page = state.articles.get_articles(query.into()).await?;
    Ok(Json(page.into()))
}

/// GET /health - Liveness check.
pub async fn health_check() -> &'static str {
    "OK"
}
