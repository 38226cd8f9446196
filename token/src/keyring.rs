//! Process-lifetime signing key ring.
//!
//! The ring is generated once at startup and never mutated: no
//! rotation, no eviction, no persistence. Once built it is shared
//! behind an `Arc` and only read, so issue/verify paths need no
//! locking.

use std::fmt;

use rand::Rng;
use rsa::{RsaPrivateKey, RsaPublicKey};
use uuid::Uuid;

use crate::error::TokenError;
use crate::jwk::{Jwk, JwkSet};

/// Number of key pairs generated when no explicit size is configured.
pub const DEFAULT_RING_SIZE: usize = 2;

const RSA_KEY_BITS: usize = 2048;

/// One RSA signing key pair with its stable identifier and public JWK
/// form.
///
/// Private material never leaves the pair; it is excluded from `Debug`
/// output and has no serialized representation.
#[derive(Clone)]
pub struct KeyPair {
    kid: String,
    private: RsaPrivateKey,
    public: RsaPublicKey,
    jwk: Jwk,
}

impl KeyPair {
    /// Generate a fresh 2048-bit RSA pair with a random `kid`.
    ///
    /// # Errors
    /// Returns `TokenError::KeyGeneration` if RSA key generation fails.
    pub fn generate() -> Result<Self, TokenError> {
        let mut rng = rand::thread_rng();
        let private = RsaPrivateKey::new(&mut rng, RSA_KEY_BITS)
            .map_err(|e| TokenError::KeyGeneration(e.to_string()))?;
        let public = private.to_public_key();
        let kid = Uuid::new_v4().to_string();
        let jwk = Jwk::from_public_key(&kid, &public);
        Ok(Self {
            kid,
            private,
            public,
            jwk,
        })
    }

    /// Key identifier, unique within the ring and stable for the life
    /// of the pair.
    #[must_use]
    pub fn kid(&self) -> &str {
        &self.kid
    }

    /// Private signing key.
    #[must_use]
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private
    }

    /// Public verification key.
    #[must_use]
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Public JWK representation.
    #[must_use]
    pub fn jwk(&self) -> &Jwk {
        &self.jwk
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair").field("kid", &self.kid).finish_non_exhaustive()
    }
}

/// Ordered, immutable-after-construction set of signing key pairs.
#[derive(Debug, Clone)]
pub struct KeyRing {
    keys: Vec<KeyPair>,
}

impl KeyRing {
    /// Generate a ring of `count` fresh key pairs.
    ///
    /// # Errors
    /// Returns `TokenError::KeyGeneration` if `count` is zero or any
    /// pair fails to generate. Callers treat this as a fatal startup
    /// condition.
    pub fn generate(count: usize) -> Result<Self, TokenError> {
        if count == 0 {
            return Err(TokenError::KeyGeneration(
                "ring must hold at least one key pair".to_string(),
            ));
        }
        let mut keys = Vec::with_capacity(count);
        for _ in 0..count {
            let pair = KeyPair::generate()?;
            tracing::info!(kid = %pair.kid, "generated signing key pair");
            keys.push(pair);
        }
        Ok(Self { keys })
    }

    /// Generate a ring of [`DEFAULT_RING_SIZE`] key pairs.
    ///
    /// # Errors
    /// See [`KeyRing::generate`].
    pub fn generate_default() -> Result<Self, TokenError> {
        Self::generate(DEFAULT_RING_SIZE)
    }

    /// Pick one key pair uniformly at random for signing.
    ///
    /// Uniformity needs no cryptographic strength here; the only
    /// requirement is that every key is eventually exercised.
    #[must_use]
    pub fn select_for_signing(&self) -> &KeyPair {
        let index = rand::thread_rng().gen_range(0..self.keys.len());
        &self.keys[index]
    }

    /// Look up a key pair by identifier.
    ///
    /// # Errors
    /// Returns `TokenError::UnknownKey` if no pair carries `kid` (a
    /// token signed outside this ring, or a forged identifier).
    pub fn lookup(&self, kid: &str) -> Result<&KeyPair, TokenError> {
        self.keys
            .iter()
            .find(|pair| pair.kid == kid)
            .ok_or_else(|| TokenError::UnknownKey(kid.to_string()))
    }

    /// Public JWK set in ring order. Pure and safe for concurrent
    /// reads.
    #[must_use]
    pub fn public_jwks(&self) -> JwkSet {
        JwkSet {
            keys: self.keys.iter().map(|pair| pair.jwk.clone()).collect(),
        }
    }

    /// Number of key pairs in the ring.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the ring is empty. Never true for a generated ring.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ring_is_rejected() {
        let err = KeyRing::generate(0).unwrap_err();
        assert!(matches!(err, TokenError::KeyGeneration(_)));
    }

    #[test]
    fn keypair_debug_hides_private_material() {
        let pair = KeyPair::generate().expect("key pair");
        let formatted = format!("{pair:?}");
        assert!(formatted.contains(pair.kid()));
        assert!(!formatted.contains("private"));
    }
}
