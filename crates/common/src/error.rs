//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::Configuration`] → 500
/// - [`ServiceError::Upstream`] → the upstream's own status code, forwarded
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed: missing or empty access token.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Deployment misconfiguration, such as a missing client certificate in
    /// an environment that requires mutual TLS.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The Teller API answered with a non-2xx status or an unusable payload.
    ///
    /// Carries the upstream status and raw response body so callers can see
    /// exactly what the upstream said.
    #[error("Teller API error [{status}]: {body}")]
    Upstream {
        /// HTTP status code returned by the upstream API.
        status: u16,
        /// Raw upstream response body text.
        body: String,
    },

    /// Any other unexpected failure (connect error, body decode failure).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::Configuration(_) => 500,
            ServiceError::Upstream { status, .. } => *status,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable error code used in [`ErrorResponse`] bodies.
    ///
    /// [`ErrorResponse`]: crate::protocol::ErrorResponse
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::Configuration(_) => "configuration_error",
            ServiceError::Upstream { .. } => "upstream_error",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_codes() {
        assert_eq!(ServiceError::BadRequest("x".into()).http_status(), 400);
        assert_eq!(ServiceError::Configuration("x".into()).http_status(), 500);
        assert_eq!(
            ServiceError::Upstream {
                status: 404,
                body: "x".into()
            }
            .http_status(),
            404
        );
        assert_eq!(ServiceError::Internal("x".into()).http_status(), 500);
    }

    #[test]
    fn upstream_display_includes_status_and_body() {
        let e = ServiceError::Upstream {
            status: 404,
            body: "account not found".into(),
        };
        let text = e.to_string();
        assert!(text.contains("404"));
        assert!(text.contains("account not found"));
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(ServiceError::BadRequest("x".into()).code(), "bad_request");
        assert_eq!(
            ServiceError::Configuration("x".into()).code(),
            "configuration_error"
        );
        assert_eq!(
            ServiceError::Upstream {
                status: 500,
                body: String::new()
            }
            .code(),
            "upstream_error"
        );
        assert_eq!(ServiceError::Internal("x".into()).code(), "internal_error");
    }
}
