//! Shared test fixtures.
//!
//! RSA-2048 generation is the slow part of this suite, so one ring is
//! generated per test binary and shared.

use std::sync::Arc;

use once_cell::sync::Lazy;
use stubidp_token::KeyRing;

/// Process-wide ring shared by every test in the binary.
pub static RING: Lazy<Arc<KeyRing>> =
    Lazy::new(|| Arc::new(KeyRing::generate_default().expect("key generation")));
