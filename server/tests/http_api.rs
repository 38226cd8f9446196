//! End-to-end tests for the three HTTP operations.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use tower::ServiceExt;

use stubidp_server::app::{build_router, AppState};
use stubidp_token::KeyRing;

static RING: Lazy<Arc<KeyRing>> =
    Lazy::new(|| Arc::new(KeyRing::generate_default().expect("key generation")));

fn app() -> axum::Router {
    build_router(AppState::new(RING.clone(), "stubidp"))
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

async fn issue(body: Option<Value>) -> Value {
    let request = match body {
        Some(claims) => Request::builder()
            .method("POST")
            .uri("/token")
            .header("content-type", "application/json")
            .body(Body::from(claims.to_string()))
            .expect("request"),
        None => Request::builder()
            .method("POST")
            .uri("/token")
            .body(Body::empty())
            .expect("request"),
    };
    let response = app().oneshot(request).await.expect("issue");
    assert_eq!(response.status(), StatusCode::OK);
    read_json(response).await
}

async fn verify(token: &str) -> (StatusCode, Value) {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/verify")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("verify");
    let status = response.status();
    (status, read_json(response).await)
}

#[tokio::test]
async fn issue_without_body_returns_bearer_envelope() {
    let payload = issue(None).await;
    assert_eq!(payload["token_type"], json!("Bearer"));
    assert_eq!(payload["expires_in"], json!(3600));
    let token = payload["access_token"].as_str().expect("access_token");
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn issue_then_verify_round_trips_claims() {
    let payload = issue(Some(json!({"sub": "alice", "role": "admin"}))).await;
    let token = payload["access_token"].as_str().expect("access_token");

    let (status, body) = verify(token).await;
    assert_eq!(status, StatusCode::OK);
    let claims = &body["claims"];
    assert_eq!(claims["sub"], json!("alice"));
    assert_eq!(claims["role"], json!("admin"));
    assert_eq!(claims["iss"], json!("stubidp"));
    assert_eq!(claims["token_use"], json!("access"));
}

#[tokio::test]
async fn jwks_publishes_one_public_entry_per_key() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/.well-known/jwks.json")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("jwks");
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json(response).await;
    let keys = payload["keys"].as_array().expect("keys");
    assert_eq!(keys.len(), 2);
    for key in keys {
        assert_eq!(key["kty"], json!("RSA"));
        assert_eq!(key["alg"], json!("RS256"));
        assert_eq!(key["use"], json!("sig"));
        assert!(key["kid"].as_str().is_some());
        assert!(key["n"].as_str().is_some());
        assert!(key["e"].as_str().is_some());
        assert!(key.get("d").is_none());
    }
}

#[tokio::test]
async fn verify_without_authorization_is_missing_token() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/verify")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("verify");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json(response).await;
    assert_eq!(payload["error"], json!("missing token"));
}

#[tokio::test]
async fn verify_garbage_is_malformed() {
    let (status, payload) = verify("not-a-token").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = payload["error"].as_str().expect("error");
    assert!(error.starts_with("malformed token"));
    assert!(payload.get("token").is_none());
}

#[tokio::test]
async fn tampered_token_echoes_token_and_header() {
    let payload = issue(None).await;
    let token = payload["access_token"].as_str().expect("access_token");
    // Swap the first character of the signature segment so the token
    // still decodes but no longer verifies.
    let (message, signature) = token.rsplit_once('.').expect("signature segment");
    let replacement = if signature.starts_with('A') { 'B' } else { 'A' };
    let tampered = format!("{message}.{replacement}{}", &signature[1..]);

    let (status, body) = verify(&tampered).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().expect("error");
    assert!(error.starts_with("invalid token"));
    assert_eq!(body["token"], json!(tampered));
    assert_eq!(body["header"]["alg"], json!("RS256"));
    assert!(body["header"]["kid"].as_str().is_some());
}

#[tokio::test]
async fn foreign_key_is_reported_as_unknown() {
    let foreign_ring = Arc::new(KeyRing::generate(1).expect("key generation"));
    let foreign_app = build_router(AppState::new(foreign_ring, "stubidp"));
    let response = foreign_app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/token")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("issue");
    let payload = read_json(response).await;
    let token = payload["access_token"].as_str().expect("access_token");

    let (status, body) = verify(token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().expect("error");
    assert!(error.starts_with("unknown signing key"));
}
