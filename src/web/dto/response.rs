//! Response DTOs for the HTTP API.

use serde::Serialize;

use crate::article::{ArticleSummary, Page};

/// Article as returned by `GET /loadArticles`.
#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub title: String,
    pub summary: String,
    pub image_ref: String,
    pub link: String,
}

impl From<ArticleSummary> for ArticleResponse {
    fn from(article: ArticleSummary) -> Self {
        Self {
            title: article.title,
            summary: article.summary,
            image_ref: article.image_ref,
            link: article.link,
        }
    }
}

/// Body of a successful `GET /loadArticles`.
#[derive(Debug, Serialize)]
pub struct LoadArticlesResponse {
    /// Cursor to send with the next request.
    pub next_cursor: i64,
    pub articles: Vec<ArticleResponse>,
}

impl From<Page> for LoadArticlesResponse {
    fn from(page: Page) -> Self {
        Self {
            next_cursor: page.next_cursor,
            articles: page.articles.into_iter().map(ArticleResponse::from).collect(),
        }
    }
}
