//! API error responses.
//!
//! Every failure leaves a handler as a JSON body with an `error`
//! message. Validation failures additionally echo the offending token
//! and its decoded header back to the caller, which makes debugging a
//! test suite against this service much less painful.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use stubidp_token::{jws, TokenError};

/// Structured API error: an HTTP status plus a JSON body.
#[derive(Debug)]
pub struct ApiError {
    /// Response status.
    pub status: StatusCode,
    /// JSON body.
    pub body: ErrorBody,
}

/// JSON error body: `{error, [token], [header]}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Human-readable failure description.
    pub error: String,
    /// The offending token, echoed on validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// The token's decoded (unverified) header, echoed on validation
    /// failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<jws::Header>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Map a verification failure to its HTTP response.
///
/// Input errors come back as 400s. `InvalidToken` echoes the token and
/// its unverified header (reference behavior); the other input errors
/// carry the message alone. Anything else is a server fault.
pub fn verification_failure(err: &TokenError, token: &str) -> ApiError {
    match err {
        TokenError::InvalidToken(_) => ApiError {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: err.to_string(),
                token: Some(token.to_string()),
                header: jws::decode_header(token).ok(),
            },
        },
        TokenError::MissingToken
        | TokenError::MalformedToken(_)
        | TokenError::UnknownKey(_)
        | TokenError::InvalidKey(_) => ApiError {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: err.to_string(),
                token: None,
                header: None,
            },
        },
        _ => server_fault(err),
    }
}

/// Build a 500 response without leaking internals beyond the message.
pub fn server_fault(err: &TokenError) -> ApiError {
    ApiError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: ErrorBody {
            error: err.to_string(),
            token: None,
            header: None,
        },
    }
}
