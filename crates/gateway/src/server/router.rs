//! Axum router construction.

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::{handlers, middleware, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/", get(handlers::index))
        .route("/api/fetch", post(handlers::fetch))
        .nest_service("/static", ServeDir::new(&state.config.frontend_dir))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    use crate::config::{Config, TellerEnv};

    fn test_state() -> AppState {
        AppState::new(Config {
            teller_env: TellerEnv::Sandbox,
            teller_cert_path: None,
            teller_key_path: None,
            teller_api_base: "http://127.0.0.1:9".into(),
            listen_port: 0,
            frontend_dir: "missing-frontend".into(),
            log_level: "info".into(),
        })
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = build(test_state());
        let req = Request::builder()
            .uri("/unknown")
            .body(Body::empty())
            .expect("request should build");
        let resp = app.oneshot(req).await.expect("oneshot");
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn healthz_route_exists() {
        let app = build(test_state());
        let req = Request::builder()
            .uri("/healthz")
            .body(Body::empty())
            .expect("request should build");
        let resp = app.oneshot(req).await.expect("oneshot");
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn missing_static_asset_returns_404() {
        let app = build(test_state());
        let req = Request::builder()
            .uri("/static/app.js")
            .body(Body::empty())
            .expect("request should build");
        let resp = app.oneshot(req).await.expect("oneshot");
        assert_eq!(resp.status(), 404);
    }
}
