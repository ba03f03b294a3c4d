//! One ingestion cycle: fetch, normalize, store.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::article::{ArticleStore, NewArticle};
use crate::clock::Clock;
use crate::config::FeedConfig;
use crate::feed::fetcher::{FeedSource, FetchError};
use crate::feed::types::FeedItem;

/// Outcome counts for one ingestion cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Items returned by the feed.
    pub fetched: usize,
    /// Items stored as new articles.
    pub inserted: usize,
    /// Items whose link was already stored.
    pub duplicates: usize,
    /// Items dropped for a missing identifier or title.
    pub skipped: usize,
    /// Items the store failed to accept.
    pub failed: usize,
}

/// Moves items from a feed source into an article store.
pub struct Ingestor<F, S> {
    source: F,
    store: S,
    url: String,
    clock: Arc<dyn Clock>,
    default_thumbnail: String,
    max_items: usize,
    store_timeout: Duration,
}

impl<F: FeedSource, S: ArticleStore> Ingestor<F, S> {
    /// Create an ingestor for the feed described by `config`.
    pub fn new(
        source: F,
        store: S,
        config: &FeedConfig,
        store_timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            store,
            url: config.url.clone(),
            clock,
            default_thumbnail: config.default_thumbnail.clone(),
            max_items: config.max_items_per_cycle,
            store_timeout,
        }
    }

    /// Feed URL this ingestor reads.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run one cycle.
    ///
    /// A fetch failure stores nothing and is returned. Per-item store
    /// failures are logged and counted; the cycle continues past them.
    pub async fn run_cycle(&self) -> Result<CycleReport, FetchError> {
        let feed = self.source.fetch(&self.url).await?;

        let mut report = CycleReport {
            fetched: feed.items.len(),
            ..CycleReport::default()
        };

        for item in feed.items.into_iter().take(self.max_items) {
            let Some(article) = self.normalize(item) else {
                report.skipped += 1;
                continue;
            };

            match tokio::time::timeout(self.store_timeout, self.store.insert_if_absent(&article))
                .await
            {
                Ok(Ok(Some(id))) => {
                    debug!(id, link = %article.link, "Stored article");
                    report.inserted += 1;
                }
                Ok(Ok(None)) => report.duplicates += 1,
                Ok(Err(e)) => {
                    warn!(link = %article.link, error = %e, "Failed to store article");
                    report.failed += 1;
                }
                Err(_) => {
                    warn!(link = %article.link, "Timed out storing article");
                    report.failed += 1;
                }
            }
        }

        if report.inserted > 0 {
            info!(
                url = %self.url,
                inserted = report.inserted,
                duplicates = report.duplicates,
                skipped = report.skipped,
                failed = report.failed,
                "Feed ingested"
            );
        } else {
            debug!(url = %self.url, ?report, "Feed ingested: no new articles");
        }

        Ok(report)
    }

    /// Turn a feed item into an article, or `None` if it lacks an id or title.
    pub fn normalize(&self, item: FeedItem) -> Option<NewArticle> {
        let link = item.id.trim();
        let title = item.title.trim();
        if link.is_empty() || title.is_empty() {
            debug!(id = %item.id, "Skipping feed item without identifier or title");
            return None;
        }

        let thumbnail = item
            .image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(self.default_thumbnail.as_str());

        let mut article = NewArticle::new(link, title, thumbnail, self.clock.now())
            .with_description(item.description.as_str());
        if let Some(category) = item.category.as_deref().map(str::trim) {
            if !category.is_empty() {
                article = article.with_category(category);
            }
        }
        Some(article)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::memory::MemoryArticleStore;
    use crate::clock::FixedClock;
    use crate::config::DEFAULT_THUMBNAIL_URL;
    use crate::feed::fake::FakeSource;
    use crate::feed::fetcher::parse_feed;
    use chrono::{DateTime, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap()
    }

    fn config() -> FeedConfig {
        FeedConfig {
            url: "https://news.example.com/rss".to_string(),
            ..FeedConfig::default()
        }
    }

    fn ingestor(
        source: FakeSource,
        store: Arc<MemoryArticleStore>,
    ) -> Ingestor<FakeSource, Arc<MemoryArticleStore>> {
        Ingestor::new(
            source,
            store,
            &config(),
            Duration::from_secs(5),
            Arc::new(FixedClock(now())),
        )
    }

    #[tokio::test]
    async fn test_two_items_then_reingest() {
        let store = Arc::new(MemoryArticleStore::new());
        let source = FakeSource::with_items(vec![FeedItem::new("a", "T1"), FeedItem::new("b", "T2")]);
        let ingestor = ingestor(source, store.clone());

        let report = ingestor.run_cycle().await.unwrap();
        assert_eq!(
            report,
            CycleReport {
                fetched: 2,
                inserted: 2,
                ..CycleReport::default()
            }
        );

        let articles = store.articles();
        assert_eq!(articles.len(), 2);
        assert_eq!((articles[0].id, articles[0].link.as_str()), (1, "a"));
        assert_eq!((articles[1].id, articles[1].link.as_str()), (2, "b"));

        let report = ingestor.run_cycle().await.unwrap();
        assert_eq!(report.inserted, 0);
        assert_eq!(report.duplicates, 2);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_placeholder_thumbnail_substituted() {
        let store = Arc::new(MemoryArticleStore::new());
        let source = FakeSource::with_items(vec![
            FeedItem::new("a", "No image"),
            FeedItem::new("b", "With image").with_image_url("https://img.example.com/b.jpg"),
            FeedItem::new("c", "Blank image").with_image_url("  "),
        ]);
        ingestor(source, store.clone()).run_cycle().await.unwrap();

        let articles = store.articles();
        assert_eq!(articles[0].thumbnail, DEFAULT_THUMBNAIL_URL);
        assert_eq!(articles[1].thumbnail, "https://img.example.com/b.jpg");
        assert_eq!(articles[2].thumbnail, DEFAULT_THUMBNAIL_URL);
    }

    #[tokio::test]
    async fn test_invalid_items_skipped() {
        let store = Arc::new(MemoryArticleStore::new());
        let source = FakeSource::with_items(vec![
            FeedItem::new("", "No id"),
            FeedItem::new("x", "   "),
            FeedItem::new("ok", "Valid"),
        ]);
        let report = ingestor(source, store.clone()).run_cycle().await.unwrap();

        assert_eq!(report.fetched, 3);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.inserted, 1);
        assert_eq!(store.articles()[0].link, "ok");
    }

    #[tokio::test]
    async fn test_item_without_guid_not_stored() {
        let rss = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
<channel>
    <title>World News</title>
    <item>
        <title>No guid here</title>
        <link>https://news.example.com/n</link>
    </item>
    <item>
        <guid>guid-1</guid>
        <title>Has guid</title>
    </item>
</channel>
</rss>"#;
        let feed = parse_feed(rss.as_bytes(), 10000).unwrap();
        let store = Arc::new(MemoryArticleStore::new());
        let report = ingestor(FakeSource::with_items(feed.items), store.clone())
            .run_cycle()
            .await
            .unwrap();

        assert_eq!(report.skipped, 1);
        assert_eq!(report.inserted, 1);
        let links: Vec<String> = store.articles().into_iter().map(|a| a.link).collect();
        assert_eq!(links, vec!["guid-1"]);
    }

    #[tokio::test]
    async fn test_fields_copied_and_stamped() {
        let store = Arc::new(MemoryArticleStore::new());
        let source = FakeSource::with_items(vec![FeedItem::new(" guid-1 ", " Title ")
            .with_description("Summary text")
            .with_category("World")]);
        ingestor(source, store.clone()).run_cycle().await.unwrap();

        let article = &store.articles()[0];
        assert_eq!(article.link, "guid-1");
        assert_eq!(article.title, "Title");
        assert_eq!(article.description, "Summary text");
        assert_eq!(article.category.as_deref(), Some("World"));
        assert_eq!(article.created_at, now());
    }

    #[tokio::test]
    async fn test_fetch_failure_stores_nothing() {
        let store = Arc::new(MemoryArticleStore::new());
        let err = ingestor(FakeSource::failing(), store.clone())
            .run_cycle()
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status(503)));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_store_failures_counted_not_fatal() {
        let store = Arc::new(MemoryArticleStore::failing());
        let source = FakeSource::with_items(vec![FeedItem::new("a", "T1"), FeedItem::new("b", "T2")]);
        let report = ingestor(source, store).run_cycle().await.unwrap();

        assert_eq!(report.failed, 2);
        assert_eq!(report.inserted, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_deadline_counts_as_failure() {
        let store = Arc::new(MemoryArticleStore::new().with_delay(Duration::from_secs(60)));
        let source = FakeSource::with_items(vec![FeedItem::new("a", "T1")]);
        let report = ingestor(source, store).run_cycle().await.unwrap();

        assert_eq!(report.failed, 1);
    }

    #[tokio::test]
    async fn test_max_items_per_cycle() {
        let store = Arc::new(MemoryArticleStore::new());
        let items = (0..10)
            .map(|i| FeedItem::new(format!("g{i}"), format!("T{i}")))
            .collect();
        let mut config = config();
        config.max_items_per_cycle = 4;
        let ingestor = Ingestor::new(
            FakeSource::with_items(items),
            store.clone(),
            &config,
            Duration::from_secs(5),
            Arc::new(FixedClock(now())),
        );

        let report = ingestor.run_cycle().await.unwrap();
        assert_eq!(report.fetched, 10);
        assert_eq!(report.inserted, 4);
        assert_eq!(store.len(), 4);
    }
}
