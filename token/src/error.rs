//! Token error types.

use thiserror::Error;

/// Result type for token operations.
pub type TokenResult<T> = Result<T, TokenError>;

/// Errors raised while generating keys, issuing tokens, or verifying them.
///
/// Verification-path variants (`MissingToken`, `MalformedToken`,
/// `UnknownKey`, `InvalidToken`) describe bad caller input and are
/// recovered into a client-error response at the HTTP boundary.
/// `KeyGeneration` is fatal at startup; `Signing` is a server fault on
/// a single request.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum TokenError {
    /// No token was supplied.
    #[error("missing token")]
    MissingToken,

    /// Token is not a decodable compact JWS.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// Token names a key identifier outside the ring.
    #[error("unknown signing key: {0}")]
    UnknownKey(String),

    /// Signature, expiry, or claim-structure validation failed.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Public key material could not be decoded.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// RSA key pair generation failed. Startup-only and unrecoverable.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// Signing a token failed unexpectedly.
    #[error("token signing failed: {0}")]
    Signing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = TokenError::MissingToken;
        assert_eq!(err.to_string(), "missing token");

        let err = TokenError::MalformedToken("not enough segments".into());
        assert_eq!(err.to_string(), "malformed token: not enough segments");

        let err = TokenError::UnknownKey("abc".into());
        assert_eq!(err.to_string(), "unknown signing key: abc");

        let err = TokenError::InvalidToken("token has expired".into());
        assert_eq!(err.to_string(), "invalid token: token has expired");
    }
}
