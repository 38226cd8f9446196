//! Public-key JSON Web Key representation.
//!
//! Only the public half of a key pair is ever expressed as a JWK; the
//! private material stays inside [`crate::keyring::KeyPair`] and is
//! never serialized.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPublicKey};
use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// A single RSA public key in JWK form: `{kty, n, e, alg, use, kid}`.
///
/// `n` and `e` are base64url-encoded (unpadded) big-endian integers per
/// RFC 7518.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type, always `"RSA"`.
    pub kty: String,
    /// Modulus.
    pub n: String,
    /// Public exponent.
    pub e: String,
    /// Signature algorithm tag, always `"RS256"`.
    pub alg: String,
    /// Usage tag, always `"sig"`.
    #[serde(rename = "use")]
    pub use_field: String,
    /// Key identifier matching the owning key pair.
    pub kid: String,
}

impl Jwk {
    /// Derive the JWK form of an RSA public key.
    #[must_use]
    pub fn from_public_key(kid: &str, key: &RsaPublicKey) -> Self {
        Self {
            kty: "RSA".to_string(),
            n: URL_SAFE_NO_PAD.encode(key.n().to_bytes_be()),
            e: URL_SAFE_NO_PAD.encode(key.e().to_bytes_be()),
            alg: "RS256".to_string(),
            use_field: "sig".to_string(),
            kid: kid.to_string(),
        }
    }

    /// Rebuild a usable [`RsaPublicKey`] from the JSON representation.
    ///
    /// # Errors
    /// Returns `TokenError::InvalidKey` if `n` or `e` are not valid
    /// base64url or do not form a valid RSA public key.
    pub fn to_public_key(&self) -> Result<RsaPublicKey, TokenError> {
        let n = URL_SAFE_NO_PAD
            .decode(&self.n)
            .map_err(|e| TokenError::InvalidKey(format!("modulus is not base64url: {e}")))?;
        let e = URL_SAFE_NO_PAD
            .decode(&self.e)
            .map_err(|e| TokenError::InvalidKey(format!("exponent is not base64url: {e}")))?;
        RsaPublicKey::new(BigUint::from_bytes_be(&n), BigUint::from_bytes_be(&e))
            .map_err(|e| TokenError::InvalidKey(format!("invalid RSA public key: {e}")))
    }
}

/// The published key set: `{keys: [...]}`, one entry per ring key pair,
/// in ring order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkSet {
    /// Public keys in ring order.
    pub keys: Vec<Jwk>,
}
