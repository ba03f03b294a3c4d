//! Feed fetcher.
//!
//! Downloads a syndication feed over HTTP with timeouts and a size cap, then
//! parses RSS/Atom into [`FeedItem`]s.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use feed_rs::model::Entry;
use feed_rs::parser;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::config::FeedConfig;
use crate::feed::types::{FeedItem, ParsedFeed};
use crate::{NewsError, Result};

/// Feed fetch failure.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The URL did not parse or uses an unsupported scheme.
    #[error("invalid feed URL: {0}")]
    InvalidUrl(String),

    /// Transport failure, including timeouts.
    #[error("failed to fetch feed: {0}")]
    Http(String),

    /// The server answered with a non-success status.
    #[error("HTTP error: status {0}")]
    Status(u16),

    /// The body exceeded the configured size limit.
    #[error("feed too large: {size} bytes (max {max} bytes)")]
    TooLarge { size: u64, max: u64 },

    /// The body is not a valid RSS or Atom document.
    #[error("failed to parse feed: {0}")]
    Parse(String),
}

/// Source of feed items.
pub trait FeedSource: Send + Sync {
    /// Fetch and parse the feed at `url`.
    fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = std::result::Result<ParsedFeed, FetchError>> + Send;
}

impl<T: FeedSource> FeedSource for Arc<T> {
    fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = std::result::Result<ParsedFeed, FetchError>> + Send {
        (**self).fetch(url)
    }
}

/// HTTP feed fetcher backed by `reqwest` and `feed-rs`.
#[derive(Debug, Clone)]
pub struct RssFetcher {
    client: Client,
    max_feed_size: u64,
    max_description_length: usize,
}

impl RssFetcher {
    /// Create a fetcher from the feed configuration.
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .timeout(Duration::from_secs(config.total_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| {
                NewsError::Fetch(FetchError::Http(format!("failed to create HTTP client: {e}")))
            })?;

        Ok(Self {
            client,
            max_feed_size: config.max_feed_size_bytes,
            max_description_length: config.max_description_length,
        })
    }
}

impl FeedSource for RssFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<ParsedFeed, FetchError> {
        validate_url(url)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_feed_size {
                return Err(FetchError::TooLarge {
                    size: content_length,
                    max: self.max_feed_size,
                });
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        if bytes.len() as u64 > self.max_feed_size {
            return Err(FetchError::TooLarge {
                size: bytes.len() as u64,
                max: self.max_feed_size,
            });
        }

        let feed = parse_feed(&bytes, self.max_description_length)?;
        debug!(url = %url, items = feed.items.len(), "Fetched feed");
        Ok(feed)
    }
}

/// Check that `url` parses and uses http or https.
pub fn validate_url(url: &str) -> std::result::Result<(), FetchError> {
    let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(FetchError::InvalidUrl(format!(
                "unsupported URL scheme: {scheme}"
            )));
        }
    }

    if parsed.host().is_none() {
        return Err(FetchError::InvalidUrl(format!("{url}: missing host")));
    }

    Ok(())
}

/// Parse RSS or Atom bytes.
///
/// Items without a guid or id keep an empty `id`.
pub fn parse_feed(
    bytes: &[u8],
    max_description_length: usize,
) -> std::result::Result<ParsedFeed, FetchError> {
    let feed = parser::Builder::new()
        .id_generator(|_, _, _| String::new())
        .build()
        .parse(bytes)
        .map_err(|e| FetchError::Parse(e.to_string()))?;

    let items = feed
        .entries
        .into_iter()
        .map(|entry| convert_entry(entry, max_description_length))
        .collect();

    Ok(ParsedFeed::with_items(items))
}

fn convert_entry(entry: Entry, max_description_length: usize) -> FeedItem {
    let image_url = image_url(&entry);
    let category = entry
        .categories
        .iter()
        .map(|c| c.term.trim())
        .find(|term| !term.is_empty())
        .map(str::to_string);

    let description = entry
        .summary
        .map(|t| t.content)
        .or(entry.content.and_then(|c| c.body))
        .map(|d| truncate(&strip_html(&d), max_description_length))
        .unwrap_or_default();

    FeedItem {
        id: entry.id,
        title: entry.title.map(|t| t.content.trim().to_string()).unwrap_or_default(),
        description,
        category,
        image_url,
    }
}

/// First media thumbnail, else the first media content typed as an image.
fn image_url(entry: &Entry) -> Option<String> {
    let thumbnail = entry
        .media
        .iter()
        .flat_map(|m| m.thumbnails.iter())
        .map(|t| t.image.uri.clone())
        .find(|uri| !uri.is_empty());

    thumbnail.or_else(|| {
        entry
            .media
            .iter()
            .flat_map(|m| m.content.iter())
            .find(|c| {
                c.content_type
                    .as_ref()
                    .is_some_and(|ct| ct.ty().as_str() == "image")
            })
            .and_then(|c| c.url.as_ref())
            .map(|u| u.to_string())
    })
}

/// Remove markup and decode the common entities, collapsing whitespace.
fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut entity: Option<String> = None;

    for ch in html.chars() {
        if in_tag {
            in_tag = ch != '>';
            continue;
        }
        if let Some(name) = entity.as_mut() {
            if ch == ';' {
                push_entity(&mut text, name);
                entity = None;
            } else if ch.is_ascii_alphanumeric() || ch == '#' {
                name.push(ch);
            } else {
                // Not an entity after all.
                text.push('&');
                text.push_str(name);
                text.push(ch);
                entity = None;
            }
            continue;
        }
        match ch {
            '<' => in_tag = true,
            '&' => entity = Some(String::new()),
            _ => text.push(ch),
        }
    }
    if let Some(name) = entity {
        text.push('&');
        text.push_str(&name);
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_entity(text: &mut String, name: &str) {
    let decoded = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => name.strip_prefix('#').and_then(|code| {
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => code.parse().ok(),
            };
            value.and_then(char::from_u32)
        }),
    };

    match decoded {
        Some(ch) => text.push(ch),
        None => {
            text.push('&');
            text.push_str(name);
            text.push(';');
        }
    }
}

/// Truncate to at most `max` characters.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
