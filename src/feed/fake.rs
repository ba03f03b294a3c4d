//! Scripted feed source for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::fetcher::{FeedSource, FetchError};
use super::types::{FeedItem, ParsedFeed};

/// [`FeedSource`] returning a fixed item list, or a 503 when unset.
///
/// Tracks call counts and concurrent fetches.
#[derive(Debug, Default)]
pub struct FakeSource {
    items: Mutex<Option<Vec<FeedItem>>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    completed: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeSource {
    pub fn with_items(items: Vec<FeedItem>) -> Self {
        Self {
            items: Mutex::new(Some(items)),
            ..Self::default()
        }
    }

    /// A source whose every fetch fails.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Make each fetch take `delay` (tokio time).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_items(&self, items: Vec<FeedItem>) {
        *self.items.lock().unwrap() = Some(items);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl FeedSource for FakeSource {
    async fn fetch(&self, _url: &str) -> Result<ParsedFeed, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let items = self.items.lock().unwrap().clone();

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completed.fetch_add(1, Ordering::SeqCst);
        items.map(ParsedFeed::with_items).ok_or(FetchError::Status(503))
    }
}
