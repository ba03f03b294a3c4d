//! Storage interface for articles.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

use super::types::{Article, Filters, NewArticle};

/// Article store failure.
#[derive(Error, Debug)]
pub enum StoreError {
    /// An article with this link already exists.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// Connectivity, constraint or query failure.
    #[error("database error: {0}")]
    Database(String),

    /// The store did not answer within the deadline.
    #[error("store call timed out")]
    Timeout,
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return StoreError::DuplicateKey(db_err.message().to_string());
            }
        }
        StoreError::Database(e.to_string())
    }
}

/// Persistence for articles.
///
/// Implementations guard their own concurrency; callers do no locking.
pub trait ArticleStore: Send + Sync {
    /// Insert an article unless one with the same link exists.
    ///
    /// Returns the new id, or `None` when the link was already stored.
    fn insert_if_absent(
        &self,
        article: &NewArticle,
    ) -> impl Future<Output = Result<Option<i64>, StoreError>> + Send;

    /// Up to `limit` articles with `id > after_id` matching `filters`, ascending by id.
    fn get_page(
        &self,
        after_id: i64,
        limit: u32,
        filters: &Filters,
    ) -> impl Future<Output = Result<Vec<Article>, StoreError>> + Send;
}

impl<T: ArticleStore> ArticleStore for Arc<T> {
    fn insert_if_absent(
        &self,
        article: &NewArticle,
    ) -> impl Future<Output = Result<Option<i64>, StoreError>> + Send {
        (**self).insert_if_absent(article)
    }

    fn get_page(
        &self,
        after_id: i64,
        limit: u32,
        filters: &Filters,
    ) -> impl Future<Output = Result<Vec<Article>, StoreError>> + Send {
        (**self).get_page(after_id, limit, filters)
    }
}
