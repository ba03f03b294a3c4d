//! HTTP API for newsfeed.
//!
//! Serves article pages at `GET /loadArticles` and a liveness probe at
//! `GET /health`.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::{ApiError, ErrorCode};
pub use handlers::{AppState, SharedState};
pub use router::{create_health_router, create_router};
pub use server::WebServer;
