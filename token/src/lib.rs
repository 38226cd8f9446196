//! Signed identity tokens for test environments.
//!
//! This crate provides the core of a stub identity provider:
//! - A process-lifetime [`KeyRing`] of RSA signing key pairs
//! - RS256 compact JWS signing and verification
//! - Default claim construction with caller overrides
//! - Publication of the public key halves as a JWK set
//!
//! The ring is built once at startup and never mutated, so issuing and
//! verifying tokens are pure reads that can run at any concurrency level.

pub mod claims;
mod error;
pub mod jwk;
pub mod jws;
pub mod keyring;

mod issuer;
mod verifier;

pub use claims::{Claims, DEFAULT_ISSUER};
pub use error::{TokenError, TokenResult};
pub use issuer::TokenIssuer;
pub use jwk::{Jwk, JwkSet};
pub use keyring::{KeyPair, KeyRing, DEFAULT_RING_SIZE};
pub use verifier::TokenVerifier;
