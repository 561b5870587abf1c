//! Configuration loading and validation for the aggregation gateway.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Teller operating environment.
///
/// Selects how the upstream client authenticates: `sandbox` needs only the
/// access token, while `development` and `production` additionally present a
/// client certificate for mutual TLS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum TellerEnv {
    /// Token-only authentication against sandbox data.
    #[default]
    Sandbox,
    /// Live data, mutual TLS required.
    Development,
    /// Live data, mutual TLS required.
    Production,
}

impl TellerEnv {
    /// Lowercase name, as reported by `GET /healthz`.
    pub fn as_str(self) -> &'static str {
        match self {
            TellerEnv::Sandbox => "sandbox",
            TellerEnv::Development => "development",
            TellerEnv::Production => "production",
        }
    }

    /// Whether upstream calls must present the Teller client certificate.
    pub fn requires_client_cert(self) -> bool {
        !matches!(self, TellerEnv::Sandbox)
    }
}

impl TryFrom<String> for TellerEnv {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(TellerEnv::Sandbox),
            "development" => Ok(TellerEnv::Development),
            "production" => Ok(TellerEnv::Production),
            other => Err(format!(
                "unknown TELLER_ENV value {other:?} (expected sandbox, development, or production)"
            )),
        }
    }
}

/// Validated gateway configuration.
///
/// Built once at startup and injected by reference everywhere else; nothing
/// reads the environment after this point.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Teller operating environment.
    #[serde(default)]
    pub teller_env: TellerEnv,

    /// Filesystem path to the PEM-encoded Teller client certificate.
    /// **Required** in development and production.
    #[serde(default)]
    pub teller_cert_path: Option<String>,

    /// Filesystem path to the PEM-encoded Teller client private key.
    /// **Required** in development and production.
    #[serde(default)]
    pub teller_key_path: Option<String>,

    /// Base URL of the Teller API. The base is the same for every
    /// environment; sandbox just skips mutual TLS.
    #[serde(default = "default_api_base")]
    pub teller_api_base: String,

    /// TCP port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Directory holding the static frontend bundle.
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_base() -> String {
    "https://api.teller.io".into()
}
fn default_listen_port() -> u16 {
    8000
}
fn default_frontend_dir() -> String {
    "frontend".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed, or if the selected
    /// environment requires certificate paths that are absent.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.teller_api_base.trim().is_empty() {
            anyhow::bail!("TELLER_API_BASE must not be empty");
        }
        if self.teller_env.requires_client_cert() {
            let cert_ok = self
                .teller_cert_path
                .as_deref()
                .is_some_and(|p| !p.trim().is_empty());
            let key_ok = self
                .teller_key_path
                .as_deref()
                .is_some_and(|p| !p.trim().is_empty());
            if !cert_ok || !key_ok {
                anyhow::bail!(
                    "TELLER_CERT_PATH and TELLER_KEY_PATH are required when TELLER_ENV is {}",
                    self.teller_env.as_str()
                );
            }
        }
        Ok(())
    }
}
