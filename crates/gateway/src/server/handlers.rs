//! Axum request handlers for all gateway endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use tracing::warn;

use common::protocol::{ErrorResponse, FetchRequest, HealthResponse};
use common::ServiceError;

use super::state::AppState;
use crate::teller::aggregate::{aggregate, DEFAULT_TRANSACTION_COUNT};

/// `GET /healthz`: liveness check reporting the configured Teller environment.
pub async fn healthz(State(state): State<AppState>) -> Response {
    let body = HealthResponse {
        ok: true,
        env: state.config.teller_env.as_str().into(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// `GET /`: serve the frontend entry point.
pub async fn index(State(state): State<AppState>) -> Response {
    let path = std::path::Path::new(&state.config.frontend_dir).join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(_) => {
            let err = ErrorResponse::new("not_found", "index.html not found");
            (StatusCode::NOT_FOUND, Json(err)).into_response()
        }
    }
}

/// `POST /api/fetch`: aggregate accounts, balances, and transactions for the
/// supplied Teller access token.
///
/// Responds 400 when the token is missing, forwards the upstream status code
/// on a Teller failure, and 500 on anything else.
pub async fn fetch(State(state): State<AppState>, Json(req): Json<FetchRequest>) -> Response {
    let access_token = req.access_token.unwrap_or_default();
    let count = req.count.unwrap_or(DEFAULT_TRANSACTION_COUNT);

    match aggregate(&state.config, &access_token, count).await {
        Ok(resp) => (StatusCode::OK, Json(resp)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

/// Map a [`ServiceError`] to its HTTP response.
///
/// The error text never contains the caller's access token; it only ever
/// travels upstream inside the `Authorization` header.
fn error_response(err: &ServiceError) -> Response {
    let status = StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::BAD_GATEWAY);
    if status.is_server_error() {
        warn!(error = %err, "aggregation failed");
    }
    let body = ErrorResponse::new(err.code(), err.to_string());
    (status, Json(body)).into_response()
}
