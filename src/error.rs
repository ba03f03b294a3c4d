//! Error types for newsfeed.

use thiserror::Error;

use crate::article::StoreError;
use crate::feed::FetchError;

/// Common error type for newsfeed.
#[derive(Error, Debug)]
pub enum NewsError {
    /// Article store failure (connectivity, constraint, query, deadline).
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Feed fetch or parse failure.
    #[error("feed error: {0}")]
    Fetch(#[from] FetchError),

    /// No resource matched the request.
    ///
    /// This is an expected, client-visible outcome rather than a server fault.
    #[error("{0}")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for newsfeed operations.
pub type Result<T> = std::result::Result<T, NewsError>;
