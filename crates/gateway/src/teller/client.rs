//! Scoped HTTP client for the Teller API.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

use common::protocol::Balance;
use common::ServiceError;

use crate::config::Config;

/// Per-call timeout applied to every upstream request.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client bound to the Teller API for the lifetime of one aggregation
/// request.
///
/// Construction performs no network I/O. The client owns its connection pool;
/// dropping it closes the pool, so holding it inside the aggregation call
/// frame releases all connections on every exit path.
#[derive(Debug)]
pub struct TellerClient {
    http: reqwest::Client,
    base_url: String,
}

impl TellerClient {
    /// Build a client authenticated with `access_token`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] if the environment requires a
    /// client certificate and the certificate or key material is absent or
    /// unreadable, and [`ServiceError::Internal`] if the underlying HTTP
    /// client cannot be constructed.
    pub fn new(cfg: &Config, access_token: &str) -> Result<Self, ServiceError> {
        let mut auth = HeaderValue::from_str(&basic_credential(access_token)).map_err(|_| {
            ServiceError::BadRequest("access token contains invalid characters".into())
        })?;
        // Keep the token out of trace output.
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(UPSTREAM_TIMEOUT);

        if cfg.teller_env.requires_client_cert() {
            builder = builder.identity(load_identity(cfg)?);
        }

        let http = builder.build().map_err(|e| {
            ServiceError::Internal(format!("failed to build upstream HTTP client: {e}"))
        })?;

        Ok(Self {
            http,
            base_url: cfg.teller_api_base.trim_end_matches('/').to_owned(),
        })
    }

    /// `GET /accounts`: list the accounts linked to the access token.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Upstream`] on a non-2xx response, or with
    /// status 502 when a 2xx body is not a JSON array.
    pub async fn list_accounts(&self) -> Result<Vec<Value>, ServiceError> {
        let url = format!("{}/accounts", self.base_url);
        match self.send_json(self.http.get(url)).await? {
            Value::Array(accounts) => Ok(accounts),
            _ => Err(ServiceError::Upstream {
                status: 502,
                body: "unexpected accounts payload".into(),
            }),
        }
    }

    /// `GET /accounts/{id}/balances`: available and ledger amounts.
    ///
    /// Missing or non-string amount fields normalise to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Upstream`] on a non-2xx response.
    pub async fn balance(&self, account_id: &str) -> Result<Balance, ServiceError> {
        let url = format!("{}/accounts/{account_id}/balances", self.base_url);
        let body = self.send_json(self.http.get(url)).await?;
        Ok(Balance {
            available: string_field(&body, "available"),
            ledger: string_field(&body, "ledger"),
        })
    }

    /// `GET /accounts/{id}/transactions?count={n}`: most recent transactions.
    ///
    /// Records are passed through unmodified. A 2xx body that is not a JSON
    /// array normalises to an empty list rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Upstream`] on a non-2xx response.
    pub async fn transactions(
        &self,
        account_id: &str,
        count: u32,
    ) -> Result<Vec<Value>, ServiceError> {
        let url = format!("{}/accounts/{account_id}/transactions", self.base_url);
        let body = self
            .send_json(self.http.get(url).query(&[("count", count)]))
            .await?;
        match body {
            Value::Array(transactions) => Ok(transactions),
            _ => Ok(Vec::new()),
        }
    }

    /// Send a request and decode the JSON body, forwarding non-2xx responses
    /// as [`ServiceError::Upstream`] with the upstream status and body text.
    async fn send_json(&self, req: reqwest::RequestBuilder) -> Result<Value, ServiceError> {
        let resp = req.send().await.map_err(transport_err)?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        resp.json().await.map_err(transport_err)
    }
}

/// `Authorization` header value for Teller's token-as-username Basic scheme.
fn basic_credential(access_token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{access_token}:")))
}

/// Load the mutual-TLS client identity from the configured certificate and
/// key paths.
fn load_identity(cfg: &Config) -> Result<reqwest::Identity, ServiceError> {
    let (cert_path, key_path) = match (&cfg.teller_cert_path, &cfg.teller_key_path) {
        (Some(cert), Some(key)) => (cert, key),
        _ => {
            return Err(ServiceError::Configuration(format!(
                "TELLER_CERT_PATH and TELLER_KEY_PATH are required when TELLER_ENV is {}",
                cfg.teller_env.as_str()
            )))
        }
    };

    let mut pem = std::fs::read(cert_path).map_err(|e| {
        ServiceError::Configuration(format!("failed to read client certificate {cert_path}: {e}"))
    })?;
    pem.extend(std::fs::read(key_path).map_err(|e| {
        ServiceError::Configuration(format!("failed to read client key {key_path}: {e}"))
    })?);

    reqwest::Identity::from_pem(&pem).map_err(|e| {
        ServiceError::Configuration(format!("invalid client certificate material: {e}"))
    })
}

/// Map transport-level failures (connect errors, timeouts, body decode) to
/// [`ServiceError::Internal`].
fn transport_err(e: reqwest::Error) -> ServiceError {
    ServiceError::Internal(e.to_string())
}

/// Extract an optional string field from a JSON value, tolerating any shape.
pub(crate) fn string_field(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_owned)
}
