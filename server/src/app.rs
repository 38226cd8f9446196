//! Application state and router wiring.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use stubidp_token::{KeyRing, TokenIssuer, TokenVerifier};

use crate::handlers;

/// Shared per-process state: the ring plus the issuer/verifier built
/// over it. Cloning is cheap; everything heavy sits behind the `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Token issuer bound to the ring.
    pub issuer: TokenIssuer,
    /// Token verifier bound to the same ring.
    pub verifier: TokenVerifier,
    /// The ring itself, for key-set publication.
    pub ring: Arc<KeyRing>,
}

impl AppState {
    /// Build state over an already-generated ring.
    #[must_use]
    pub fn new(ring: Arc<KeyRing>, issuer_name: &str) -> Self {
        Self {
            issuer: TokenIssuer::with_issuer(ring.clone(), issuer_name),
            verifier: TokenVerifier::new(ring.clone()),
            ring,
        }
    }
}

/// Build the service router: issue, verify, and key publication.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/token", post(handlers::issue_token))
        .route("/verify", get(handlers::verify_token))
        .route("/.well-known/jwks.json", get(handlers::jwks))
        .with_state(state)
}
