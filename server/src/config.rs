//! Server configuration sourced from environment variables.

use anyhow::{Context, Result};
use std::net::SocketAddr;

use stubidp_token::{DEFAULT_ISSUER, DEFAULT_RING_SIZE};

/// Runtime configuration for the token issuer service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Value of the `iss` claim on issued tokens.
    pub issuer: String,
    /// Number of signing key pairs generated at startup.
    pub ring_size: usize,
}

impl ServerConfig {
    /// Read configuration from the environment, falling back to
    /// defaults: `STUBIDP_BIND` (0.0.0.0:8080), `STUBIDP_ISSUER`
    /// (stubidp), `STUBIDP_RING_SIZE` (2).
    ///
    /// # Errors
    /// Returns an error if a variable is set but does not parse.
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("STUBIDP_BIND")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .with_context(|| "parse STUBIDP_BIND")?;
        let issuer =
            std::env::var("STUBIDP_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.to_string());
        let ring_size = match std::env::var("STUBIDP_RING_SIZE") {
            Ok(value) => value.parse().with_context(|| "parse STUBIDP_RING_SIZE")?,
            Err(_) => DEFAULT_RING_SIZE,
        };
        Ok(Self {
            bind_addr,
            issuer,
            ring_size,
        })
    }
}
