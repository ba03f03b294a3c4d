//! Feed ingestion.
//!
//! Fetches the configured syndication feed and stores its items as articles,
//! once at startup and then on a fixed interval.

#[cfg(test)]
pub(crate) mod fake;
pub mod fetcher;
pub mod ingest;
pub mod types;
pub mod updater;

pub use fetcher::{parse_feed, validate_url, FeedSource, FetchError, RssFetcher};
pub use ingest::{CycleReport, Ingestor};
pub use types::{FeedItem, ParsedFeed};
pub use updater::{FeedUpdater, UpdaterHandle};
