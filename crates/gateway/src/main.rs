//! `teller-agg-svc` gateway binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables (a local `.env`
//!    file is honoured for development).
//! 2. Initialise structured logging.
//! 3. Build the Axum router and start the HTTP server.

mod config;
mod server;
mod telemetry;
mod teller;

use anyhow::Result;
use tracing::info;

use config::Config;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    dotenvy::dotenv().ok();
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        teller_env = cfg.teller_env.as_str(),
        listen_port = cfg.listen_port,
        "gateway starting"
    );

    // -----------------------------------------------------------------------
    // 3. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(cfg.clone());
    let router = server::router::build(state);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
