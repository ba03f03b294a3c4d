//! newsfeed - syndication feed aggregator.
//!
//! Periodically ingests a single RSS/Atom feed into SQLite and serves the
//! stored articles page by page over HTTP.

pub mod article;
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod feed;
pub mod logging;
pub mod web;

pub use article::{
    Article, ArticleRepository, ArticleService, ArticleStore, ArticleSummary, Filters,
    GetArticlesRequest, NewArticle, Page, StoreError,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use db::{Database, DbPool};
pub use error::{NewsError, Result};
pub use feed::{
    CycleReport, FeedItem, FeedSource, FeedUpdater, FetchError, Ingestor, ParsedFeed,
    RssFetcher, UpdaterHandle,
};
pub use web::WebServer;
