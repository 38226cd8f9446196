//! HTTP surface for the stub identity provider.
//!
//! Thin plumbing around `stubidp_token`: three routes, a config struct,
//! and a uniform error shape. The interesting behavior lives in the
//! token crate; handlers only parse requests and serialize results.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
