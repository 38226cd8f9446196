//! Request handlers for the three service operations.

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde::Serialize;

use stubidp_token::{Claims, JwkSet};

use crate::app::AppState;
use crate::error::{self, ApiError};

/// Advertised token lifetime, seconds. Purely informational: issued
/// tokens carry no `exp` unless the caller supplies one.
pub const TOKEN_TTL_SECS: u64 = 3600;

/// Response body for `POST /token`.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    /// The signed compact token.
    pub access_token: String,
    /// Always `"Bearer"`.
    pub token_type: String,
    /// Advertised lifetime in seconds.
    pub expires_in: u64,
}

/// Response body for a successful `GET /verify`.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyResponse {
    /// The verified token's claims.
    pub claims: Claims,
}

/// `POST /token` — issue a signed token.
///
/// An optional JSON object body supplies caller claims; absent body
/// means defaults only. Caller claims are merged verbatim, never
/// validated.
pub async fn issue_token(
    State(state): State<AppState>,
    body: Option<Json<Claims>>,
) -> Result<Json<TokenResponse>, ApiError> {
    let caller_claims = body.map(|Json(claims)| claims);
    let access_token = state.issuer.issue(caller_claims).map_err(|err| {
        tracing::error!(error = %err, "token issuance failed");
        error::server_fault(&err)
    })?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: TOKEN_TTL_SECS,
    }))
}

/// `GET /.well-known/jwks.json` — publish the ring's public keys.
pub async fn jwks(State(state): State<AppState>) -> Json<JwkSet> {
    Json(state.ring.public_jwks())
}

/// `GET /verify` — verify a token from the `Authorization` header.
///
/// The token is the last whitespace-separated piece of the header
/// value, so both `Bearer <token>` and a bare token work.
pub async fn verify_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<VerifyResponse>, ApiError> {
    let token = bearer_token(&headers);
    match state.verifier.verify(&token) {
        Ok(claims) => Ok(Json(VerifyResponse { claims })),
        Err(err) => {
            tracing::debug!(error = %err, "token verification failed");
            Err(error::verification_failure(&err, &token))
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> String {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split_whitespace().last())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_takes_last_piece() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers), "abc.def.ghi");
    }

    #[test]
    fn bare_token_works_without_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("abc.def.ghi"));
        assert_eq!(bearer_token(&headers), "abc.def.ghi");
    }

    #[test]
    fn missing_header_yields_empty_token() {
        assert_eq!(bearer_token(&HeaderMap::new()), "");
    }
}
