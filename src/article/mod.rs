//! Article storage and querying.
//!
//! Articles are written by the feed ingestor and read page by page through
//! the query service.

#[cfg(test)]
pub(crate) mod memory;
pub mod repository;
pub mod service;
pub mod store;
pub mod types;

pub use repository::ArticleRepository;
pub use service::{ArticleService, NO_ARTICLES_MESSAGE};
pub use store::{ArticleStore, StoreError};
pub use types::{
    format_timestamp, parse_timestamp, Article, ArticleSummary, Column, Filters,
    GetArticlesRequest, NewArticle, Page, Predicate,
};
