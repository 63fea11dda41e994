pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::analysis::handlers;
use crate::config::Config;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/upload-pdf", post(handlers::handle_upload_pdf))
        .route("/analyze", post(handlers::handle_analyze))
        .route("/compare", post(handlers::handle_compare))
        .route(
            "/session",
            get(handlers::handle_get_session).delete(handlers::handle_clear_session),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// `*` allows any origin; anything else is parsed as a single allowed origin.
pub fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow_origin.trim() == "*" {
        return CorsLayer::permissive();
    }

    match config.cors_allow_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            warn!(
                "Invalid CORS_ALLOW_ORIGIN '{}', allowing any origin",
                config.cors_allow_origin
            );
            CorsLayer::permissive()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request},
    };
    use tower::ServiceExt;

    use super::*;

    async fn allowed_origin(cors_allow_origin: &str, origin: &str) -> Option<String> {
        let config = Config {
            cors_allow_origin: cors_allow_origin.to_string(),
            ..Config::default()
        };
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(cors_layer(&config));
        let request = Request::builder()
            .uri("/")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_wildcard_allows_any_origin() {
        let allowed = allowed_origin("*", "https://anywhere.example").await;
        assert_eq!(allowed.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn test_single_origin_is_echoed() {
        let allowed = allowed_origin("https://lens.example", "https://lens.example").await;
        assert_eq!(allowed.as_deref(), Some("https://lens.example"));
    }

    #[tokio::test]
    async fn test_unparseable_origin_falls_back_to_any() {
        let allowed = allowed_origin("bad\norigin", "https://anywhere.example").await;
        assert_eq!(allowed.as_deref(), Some("*"));
    }
}
