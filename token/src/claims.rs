//! Claim construction and merging.
//!
//! Claims are kept as an untyped JSON map. The issuer performs no claim
//! validation: whatever the caller supplies is merged over the defaults
//! and signed as-is, which is exactly what a test harness wants.

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

/// Claims carried inside a token, by claim name.
pub type Claims = serde_json::Map<String, Value>;

/// Issuer (`iss`) value used when no other issuer name is configured.
pub const DEFAULT_ISSUER: &str = "stubidp";

/// Build the default claim set for a freshly issued token.
///
/// Produces `iss`, a random `sub` (UUIDv4, fresh per call), the fixed
/// `token_use = "access"` marker, and `auth_time` as the current Unix
/// timestamp. No `exp` is set; expiry only applies when a caller asks
/// for one.
#[must_use]
pub fn default_claims(issuer: &str) -> Claims {
    let mut claims = Claims::new();
    claims.insert("iss".into(), Value::String(issuer.to_string()));
    claims.insert("sub".into(), Value::String(Uuid::new_v4().to_string()));
    claims.insert("token_use".into(), Value::String("access".to_string()));
    claims.insert("auth_time".into(), Value::from(Utc::now().timestamp()));
    claims
}

/// Shallow-merge `overrides` into `base`. Override values win on
/// collision; unknown keys pass through unchanged.
#[must_use]
pub fn merge(mut base: Claims, overrides: Claims) -> Claims {
    for (name, value) in overrides {
        base.insert(name, value);
    }
    base
}
