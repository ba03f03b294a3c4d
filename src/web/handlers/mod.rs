//! API handlers.

pub mod articles;

pub use articles::*;

use std::sync::Arc;

use crate::article::{ArticleRepository, ArticleService};

/// Shared application state.
pub struct AppState {
    /// Article query service.
    pub articles: ArticleService<ArticleRepository>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(articles: ArticleService<ArticleRepository>) -> Self {
        Self { articles }
    }
}

/// State handle passed to the router.
pub type SharedState = Arc<AppState>;
