//! Compact JWS encoding, signing, and verification.
//!
//! Tokens are three dot-separated base64url segments (RFC 7515): a JSON
//! header carrying `alg` and `kid`, the claims payload, and an RSA
//! PKCS#1 v1.5 signature over `header.payload`.
//!
//! Verification selects the signature routine from the algorithm named
//! in the (untrusted) token header, matching the reference behavior of
//! this harness. Only the RSA family is implemented, so the worst a
//! forged header can do is pick a different SHA digest width.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::sha2::{Sha256, Sha384, Sha512};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};

use crate::claims::Claims;
use crate::error::TokenError;

/// Algorithm declared in the header of every issued token.
pub const SIGNING_ALG: &str = "RS256";

/// Decoded JWS header.
///
/// `typ` and `kid` are optional on decode so foreign tokens parse far
/// enough to report a useful error; issued tokens always carry both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    /// Signature algorithm tag.
    pub alg: String,
    /// Token type, `"JWT"` on issued tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    /// Identifier of the key pair that signed the token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
}

fn encode_segment(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

fn decode_segment(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}

fn split_token(token: &str) -> Result<(&str, &str, &str), TokenError> {
    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(signature), None) => Ok((header, payload, signature)),
        _ => Err(TokenError::MalformedToken(
            "token must have three dot-separated segments".to_string(),
        )),
    }
}

/// Sign `claims` into a compact RS256 token carrying `kid` in its header.
///
/// # Errors
/// Returns `TokenError::Signing` if serialization or the RSA signing
/// operation fails. Neither happens under normal operation; the error
/// path exists so one bad request cannot take the service down.
pub fn sign(claims: &Claims, kid: &str, private_key: &RsaPrivateKey) -> Result<String, TokenError> {
    let header = Header {
        alg: SIGNING_ALG.to_string(),
        typ: Some("JWT".to_string()),
        kid: Some(kid.to_string()),
    };
    let header_json =
        serde_json::to_vec(&header).map_err(|e| TokenError::Signing(e.to_string()))?;
    let payload_json =
        serde_json::to_vec(claims).map_err(|e| TokenError::Signing(e.to_string()))?;

    let message = format!(
        "{}.{}",
        encode_segment(&header_json),
        encode_segment(&payload_json)
    );

    let signing_key = SigningKey::<Sha256>::new(private_key.clone());
    let signature = signing_key
        .try_sign(message.as_bytes())
        .map_err(|e| TokenError::Signing(e.to_string()))?;

    Ok(format!(
        "{message}.{}",
        encode_segment(&signature.to_bytes())
    ))
}

/// Decode a token's header without verifying the signature.
///
/// Used to recover `alg` and `kid` before the matching public key is
/// known.
///
/// # Errors
/// Returns `TokenError::MalformedToken` if the token does not have
/// three segments or the header segment is not base64url-encoded JSON.
pub fn decode_header(token: &str) -> Result<Header, TokenError> {
    let (header_b64, _, _) = split_token(token)?;
    let header_bytes = decode_segment(header_b64)
        .map_err(|_| TokenError::MalformedToken("header is not valid base64url".to_string()))?;
    serde_json::from_slice(&header_bytes)
        .map_err(|_| TokenError::MalformedToken("header is not valid JSON".to_string()))
}

/// Verify a token's signature and structural validity, returning its
/// claims.
///
/// The signature routine is chosen by `alg` (as recovered from the
/// token header by the caller); RS256, RS384, and RS512 are supported.
///
/// # Errors
/// - `TokenError::MalformedToken` if the payload or signature segments
///   do not decode.
/// - `TokenError::InvalidToken` for an unsupported algorithm, a
///   signature mismatch, an expired `exp`, or a future `nbf`.
pub fn verify(token: &str, alg: &str, public_key: &RsaPublicKey) -> Result<Claims, TokenError> {
    let (header_b64, payload_b64, signature_b64) = split_token(token)?;

    let payload_bytes = decode_segment(payload_b64)
        .map_err(|_| TokenError::MalformedToken("payload is not valid base64url".to_string()))?;
    let claims: Claims = serde_json::from_slice(&payload_bytes)
        .map_err(|_| TokenError::MalformedToken("payload is not a JSON object".to_string()))?;

    let signature = decode_segment(signature_b64)
        .map_err(|_| TokenError::MalformedToken("signature is not valid base64url".to_string()))?;

    let message = format!("{header_b64}.{payload_b64}");
    let valid = match alg {
        "RS256" => verify_rs256(&message, &signature, public_key)?,
        "RS384" => verify_rs384(&message, &signature, public_key)?,
        "RS512" => verify_rs512(&message, &signature, public_key)?,
        other => {
            return Err(TokenError::InvalidToken(format!(
                "unsupported algorithm: {other}"
            )))
        }
    };
    if !valid {
        return Err(TokenError::InvalidToken(
            "signature verification failed".to_string(),
        ));
    }

    validate_registered_claims(&claims)?;
    Ok(claims)
}

fn verify_rs256(
    message: &str,
    signature: &[u8],
    public_key: &RsaPublicKey,
) -> Result<bool, TokenError> {
    let verifying_key = VerifyingKey::<Sha256>::new(public_key.clone());
    let signature = Signature::try_from(signature)
        .map_err(|_| TokenError::InvalidToken("signature has invalid encoding".to_string()))?;
    Ok(verifying_key.verify(message.as_bytes(), &signature).is_ok())
}

fn verify_rs384(
    message: &str,
    signature: &[u8],
    public_key: &RsaPublicKey,
) -> Result<bool, TokenError> {
    let verifying_key = VerifyingKey::<Sha384>::new(public_key.clone());
    let signature = Signature::try_from(signature)
        .map_err(|_| TokenError::InvalidToken("signature has invalid encoding".to_string()))?;
    Ok(verifying_key.verify(message.as_bytes(), &signature).is_ok())
}

fn verify_rs512(
    message: &str,
    signature: &[u8],
    public_key: &RsaPublicKey,
) -> Result<bool, TokenError> {
    let verifying_key = VerifyingKey::<Sha512>::new(public_key.clone());
    let signature = Signature::try_from(signature)
        .map_err(|_| TokenError::InvalidToken("signature has invalid encoding".to_string()))?;
    Ok(verifying_key.verify(message.as_bytes(), &signature).is_ok())
}

/// Structural checks on registered claims. Only applies to claims that
/// are actually present; issued tokens carry no `exp` by default.
fn validate_registered_claims(claims: &Claims) -> Result<(), TokenError> {
    let now = Utc::now().timestamp();

    if let Some(exp) = claims.get("exp").and_then(serde_json::Value::as_i64) {
        if now > exp {
            return Err(TokenError::InvalidToken("token has expired".to_string()));
        }
    }

    if let Some(nbf) = claims.get("nbf").and_then(serde_json::Value::as_i64) {
        if now < nbf {
            return Err(TokenError::InvalidToken("token not yet valid".to_string()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_header_rejects_wrong_segment_count() {
        let err = decode_header("only.two").unwrap_err();
        assert!(matches!(err, TokenError::MalformedToken(_)));

        let err = decode_header("a.b.c.d").unwrap_err();
        assert!(matches!(err, TokenError::MalformedToken(_)));
    }

    #[test]
    fn decode_header_rejects_bad_base64() {
        let err = decode_header("!!!.payload.signature").unwrap_err();
        assert!(matches!(err, TokenError::MalformedToken(_)));
    }

    #[test]
    fn decode_header_rejects_non_json_header() {
        let header = URL_SAFE_NO_PAD.encode(b"not json");
        let err = decode_header(&format!("{header}.payload.signature")).unwrap_err();
        assert!(matches!(err, TokenError::MalformedToken(_)));
    }

    #[test]
    fn decode_header_recovers_alg_and_kid() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT","kid":"k1"}"#);
        let decoded = decode_header(&format!("{header}.e30.sig")).expect("header");
        assert_eq!(decoded.alg, "RS256");
        assert_eq!(decoded.kid.as_deref(), Some("k1"));
    }

    #[test]
    fn registered_claim_checks() {
        let mut claims = Claims::new();
        claims.insert("exp".into(), serde_json::Value::from(0));
        let err = validate_registered_claims(&claims).unwrap_err();
        assert!(matches!(err, TokenError::InvalidToken(_)));

        let mut claims = Claims::new();
        claims.insert(
            "nbf".into(),
            serde_json::Value::from(Utc::now().timestamp() + 3600),
        );
        let err = validate_registered_claims(&claims).unwrap_err();
        assert!(matches!(err, TokenError::InvalidToken(_)));

        // Claims without exp/nbf pass untouched.
        assert!(validate_registered_claims(&Claims::new()).is_ok());
    }
}
