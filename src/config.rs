//! Configuration module for newsfeed.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::{NewsError, Result};

/// Smallest page size the article API will serve.
pub const MIN_PAGE_SIZE: u32 = 1;

/// Largest page size the article API will serve.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Placeholder thumbnail used when a feed item carries no image.
pub const DEFAULT_THUMBNAIL_URL: &str =
    "https://pbs.twimg.com/profile_images/1140654461603287040/bUUAgDF6_400x400.jpg";

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// How long to wait for a free pooled connection.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

fn default_db_path() -> String {
    "data/newsfeed.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
        }
    }
}

/// Feed ingestion configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// URL of the syndication feed to poll.
    #[serde(default)]
    pub url: String,
    /// Seconds between ingestion cycles.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Read timeout in seconds.
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
    /// Total request timeout in seconds.
    #[serde(default = "default_total_timeout")]
    pub total_timeout_secs: u64,
    /// Maximum number of redirects to follow.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// Maximum feed size in bytes.
    #[serde(default = "default_max_feed_size")]
    pub max_feed_size_bytes: u64,
    /// Maximum number of items stored per cycle.
    #[serde(default = "default_max_items")]
    pub max_items_per_cycle: usize,
    /// Maximum description length in characters.
    #[serde(default = "default_max_description_length")]
    pub max_description_length: usize,
    /// Thumbnail substituted when an item has no image.
    #[serde(default = "default_thumbnail")]
    pub default_thumbnail: String,
    /// User agent sent with feed requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_refresh_interval() -> u64 {
    60
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_read_timeout() -> u64 {
    20
}

fn default_total_timeout() -> u64 {
    30
}

fn default_max_redirects() -> usize {
    5
}

fn default_max_feed_size() -> u64 {
    5 * 1024 * 1024 // 5MB
}

fn default_max_items() -> usize {
    100
}

fn default_max_description_length() -> usize {
    10000
}

fn default_thumbnail() -> String {
    DEFAULT_THUMBNAIL_URL.to_string()
}

fn default_user_agent() -> String {
    format!("newsfeed/{} (feed reader)", env!("CARGO_PKG_VERSION"))
}

impl FeedConfig {
    /// Interval between ingestion cycles.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            refresh_interval_secs: default_refresh_interval(),
            connect_timeout_secs: default_connect_timeout(),
            read_timeout_secs: default_read_timeout(),
            total_timeout_secs: default_total_timeout(),
            max_redirects: default_max_redirects(),
            max_feed_size_bytes: default_max_feed_size(),
            max_items_per_cycle: default_max_items(),
            max_description_length: default_max_description_length(),
            default_thumbnail: default_thumbnail(),
            user_agent: default_user_agent(),
        }
    }
}

/// Article API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticlesConfig {
    /// Number of articles returned per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Deadline for a single store call, in seconds.
    #[serde(default = "default_store_timeout")]
    pub store_timeout_secs: u64,
}

fn default_page_size() -> u32 {
    3
}

fn default_store_timeout() -> u64 {
    5
}

impl ArticlesConfig {
    /// Deadline for a single store call.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }
}

impl Default for ArticlesConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            store_timeout_secs: default_store_timeout(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/newsfeed.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Feed ingestion configuration.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Article API configuration.
    #[serde(default)]
    pub articles: ArticlesConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| NewsError::Config(format!("config parse error: {e}")))
    }

    /// Apply overrides from `NEWSFEED_*` environment variables.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("NEWSFEED_FEED_URL") {
            if !url.is_empty() {
                self.feed.url = url;
            }
        }
        if let Ok(path) = std::env::var("NEWSFEED_DATABASE_PATH") {
            if !path.is_empty() {
                self.database.path = path;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.feed.url.is_empty() {
            return Err(NewsError::Config(
                "feed.url is not set. \
                 Set it in config.toml or via NEWSFEED_FEED_URL environment variable."
                    .to_string(),
            ));
        }
        crate::feed::validate_url(&self.feed.url)
            .map_err(|e| NewsError::Config(format!("feed.url: {e}")))?;

        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.articles.page_size) {
            return Err(NewsError::Config(format!(
                "articles.page_size must be between {} and {}, got {}",
                MIN_PAGE_SIZE, MAX_PAGE_SIZE, self.articles.page_size
            )));
        }

        let non_zero = [
            ("feed.refresh_interval_secs", self.feed.refresh_interval_secs),
            ("feed.total_timeout_secs", self.feed.total_timeout_secs),
            ("articles.store_timeout_secs", self.articles.store_timeout_secs),
            ("database.acquire_timeout_secs", self.database.acquire_timeout_secs),
        ];
        for (name, value) in non_zero {
            if value == 0 {
                return Err(NewsError::Config(format!("{name} must be greater than 0")));
            }
        }
        if self.database.max_connections == 0 {
            return Err(NewsError::Config(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
