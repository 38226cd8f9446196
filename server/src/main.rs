//! Stub identity provider entry point.
//!
//! Generates the signing key ring (fatal on failure — the service must
//! not become ready without keys), wires the router, and serves until
//! ctrl-c.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use stubidp_server::{app, config::ServerConfig};
use stubidp_token::KeyRing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ServerConfig::from_env()?;
    let ring = Arc::new(KeyRing::generate(config.ring_size).context("signing key generation")?);
    let state = app::AppState::new(ring, &config.issuer);
    let router = app::build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, issuer = %config.issuer, "token issuer listening");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
