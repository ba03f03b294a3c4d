//! Router configuration for the HTTP API.

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{health_check, load_articles, SharedState};
use super::middleware::create_cors_layer;

/// Create the API router.
pub fn create_router(app_state: SharedState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/loadArticles", get(load_articles))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{ArticleRepository, ArticleService};
    use crate::web::handlers::AppState;
    use crate::Database;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    async fn app() -> Router {
        let db = Database::open_in_memory().await.unwrap();
        let service = ArticleService::new(
            ArticleRepository::new(db.pool().clone()),
            3,
            Duration::from_secs(5),
        );
        create_router(Arc::new(AppState::new(service)), &[]).merge(create_health_router())
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .await
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_load_articles_empty_store() {
        let response = app()
            .await
            .oneshot(
                Request::builder()
                    .uri("/loadArticles?cursor=0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = app()
            .await
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
