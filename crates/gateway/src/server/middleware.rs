//! Axum middleware layers applied to the router.

use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS for the single-page frontend.
///
/// TODO: restrict allowed origins once the frontend is served from a fixed
/// domain.
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
