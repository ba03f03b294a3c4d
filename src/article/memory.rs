//! In-memory article store for unit tests.

use std::sync::Mutex;
use std::time::Duration;

use super::store::{ArticleStore, StoreError};
use super::types::{Article, Filters, NewArticle};

/// Vector-backed [`ArticleStore`] with optional injected failures and latency.
#[derive(Debug, Default)]
pub struct MemoryArticleStore {
    articles: Mutex<Vec<Article>>,
    failing: bool,
    delay: Option<Duration>,
}

impl MemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails with a database error.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Delay every call by `delay` (tokio time).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Snapshot of stored articles in id order.
    pub fn articles(&self) -> Vec<Article> {
        self.articles.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.articles.lock().unwrap().len()
    }

    async fn enter(&self) -> Result<(), StoreError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing {
            return Err(StoreError::Database("connection refused".to_string()));
        }
        Ok(())
    }
}

impl ArticleStore for MemoryArticleStore {
    async fn insert_if_absent(&self, article: &NewArticle) -> Result<Option<i64>, StoreError> {
        self.enter().await?;
        let mut articles = self.articles.lock().unwrap();
        if articles.iter().any(|a| a.link == article.link) {
            return Ok(None);
        }
        let id = articles.last().map_or(1, |a| a.id + 1);
        articles.push(Article {
            id,
            title: article.title.clone(),
            description: article.description.clone(),
            link: article.link.clone(),
            category: article.category.clone(),
            thumbnail: article.thumbnail.clone(),
            created_at: article.created_at,
        });
        Ok(Some(id))
    }

    async fn get_page(
        &self,
        after_id: i64,
        limit: u32,
        filters: &Filters,
    ) -> Result<Vec<Article>, StoreError> {
        self.enter().await?;
        let articles = self.articles.lock().unwrap();
        Ok(articles
            .iter()
            .filter(|a| a.id > after_id && filters.matches(a))
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
