//! Article query service.
//!
//! Turns a client request into a filtered page read against the store and
//! shapes the result for the API.

use std::time::Duration;

use tracing::debug;

use super::store::{ArticleStore, StoreError};
use super::types::{ArticleSummary, Filters, GetArticlesRequest, Page};
use crate::{NewsError, Result};

/// Message returned when a page read comes back empty.
pub const NO_ARTICLES_MESSAGE: &str = "no articles found matching criteria";

/// Service for reading article pages.
#[derive(Debug, Clone)]
pub struct ArticleService<S> {
    store: S,
    page_size: u32,
    store_timeout: Duration,
}

impl<S: ArticleStore> ArticleService<S> {
    /// Create a new service.
    pub fn new(store: S, page_size: u32, store_timeout: Duration) -> Self {
        Self {
            store,
            page_size,
            store_timeout,
        }
    }

    /// Number of articles returned per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Get the page of articles after `request.cursor`.
    ///
    /// Only `title` and `category` filter; `provider` is accepted and ignored.
    ///
    /// # Errors
    ///
    /// - [`NewsError::NotFound`] when no article matches
    /// - [`NewsError::Store`] when the store fails or misses the deadline
    pub async fn get_articles(&self, request: GetArticlesRequest) -> Result<Page> {
        let mut filters = Filters::new();
        filters.title = request.title.filter(|t| !t.is_empty());
        filters.category = request.category.filter(|c| !c.is_empty());

        let articles = tokio::time::timeout(
            self.store_timeout,
            self.store.get_page(request.cursor, self.page_size, &filters),
        )
        .await
        .map_err(|_| StoreError::Timeout)??;

        let Some(last) = articles.last() else {
            return Err(NewsError::NotFound(NO_ARTICLES_MESSAGE.to_string()));
        };
        let next_cursor = last.id;

        debug!(
            cursor = request.cursor,
            next_cursor,
            count = articles.len(),
            "Loaded article page"
        );

        Ok(Page {
            next_cursor,
            articles: articles.into_iter().map(ArticleSummary::from).collect(),
        })
    }
}
