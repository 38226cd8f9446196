//! Token issuance.

use std::sync::Arc;

use crate::claims::{self, Claims, DEFAULT_ISSUER};
use crate::error::TokenError;
use crate::jws;
use crate::keyring::KeyRing;

/// Produces signed tokens from caller-supplied claims.
///
/// Holds a shared reference to the ring and an issuer name; issuing a
/// token only reads the ring.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    ring: Arc<KeyRing>,
    issuer: String,
}

impl TokenIssuer {
    /// Create an issuer with the default issuer name.
    #[must_use]
    pub fn new(ring: Arc<KeyRing>) -> Self {
        Self::with_issuer(ring, DEFAULT_ISSUER)
    }

    /// Create an issuer with an explicit `iss` value.
    #[must_use]
    pub fn with_issuer(ring: Arc<KeyRing>, issuer: impl Into<String>) -> Self {
        Self {
            ring,
            issuer: issuer.into(),
        }
    }

    /// Issue a signed token.
    ///
    /// Default claims are built, caller claims are shallow-merged over
    /// them (caller values win), a signing key is picked at random from
    /// the ring, and the result is encoded as an RS256 compact JWS with
    /// the chosen key's `kid` in the header. Caller claims are accepted
    /// as opaque JSON and never validated.
    ///
    /// # Errors
    /// Returns `TokenError::Signing` if the signing operation itself
    /// fails; there is no other failure path once the ring exists.
    pub fn issue(&self, caller_claims: Option<Claims>) -> Result<String, TokenError> {
        let mut claims = claims::default_claims(&self.issuer);
        if let Some(overrides) = caller_claims {
            claims = claims::merge(claims, overrides);
        }

        let pair = self.ring.select_for_signing();
        tracing::debug!(kid = %pair.kid(), "issuing token");
        jws::sign(&claims, pair.kid(), pair.private_key())
    }
}
