//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use newsfeed::web::handlers::AppState;
use newsfeed::web::router::{create_health_router, create_router};
use newsfeed::{ArticleRepository, ArticleService, Database, NewArticle};

/// Default deadline for store calls in tests.
pub const STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Thumbnail used for seeded articles.
pub const SEED_THUMBNAIL: &str = "https://img.example.com/seed.png";

/// Create a test server over an in-memory database.
pub async fn create_test_server(page_size: u32) -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let server = create_test_server_for(&db, page_size);
    (server, db)
}

/// Create a test server over an existing database.
pub fn create_test_server_for(db: &Database, page_size: u32) -> TestServer {
    let service = ArticleService::new(
        ArticleRepository::new(db.pool().clone()),
        page_size,
        STORE_TIMEOUT,
    );
    let router = create_router(Arc::new(AppState::new(service)), &[]).merge(create_health_router());
    TestServer::new(router).expect("Failed to create test server")
}

/// Insert articles as `(link, title, category)`, in order.
pub async fn seed(db: &Database, items: &[(&str, &str, Option<&str>)]) {
    let repo = ArticleRepository::new(db.pool().clone());
    let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    for (link, title, category) in items {
        let mut article = NewArticle::new(*link, *title, SEED_THUMBNAIL, created_at)
            .with_description(format!("Summary of {title}"));
        if let Some(category) = category {
            article = article.with_category(*category);
        }
        repo.insert(&article).await.expect("Failed to seed article");
    }
}

/// RSS document with one `<item>` per `(guid, title)`.
pub fn rss_feed(items: &[(&str, &str)]) -> String {
    let items: String = items
        .iter()
        .map(|(guid, title)| {
            format!(
                "<item><guid>{guid}</guid><title>{title}</title>\
                 <description>About {title}</description></item>"
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>Test Feed</title>{items}</channel></rss>"#
    )
}
