//! # Spotify Integration Module
//!
//! The HTTP layer between the management services and the Spotify Web API.
//! Each submodule covers one domain of API functionality:
//!
//! - [`auth`] - OAuth 2.0 PKCE: authorization URL construction, code
//!   exchange, and token refresh against the accounts service
//! - [`player`] - the recently-played feed with its `after` epoch-ms cursor
//! - [`artists`] - full artist details (name and genre list) by id
//!
//! All functions take the endpoint base URL and bearer token as parameters
//! rather than reading process-wide state, so the test suite can point them
//! at a local stub server.
//!
//! Transient gateway errors (502) are retried a bounded number of times
//! with a delay; rate limiting and other statuses propagate to the caller,
//! which treats them as non-fatal per the crate error taxonomy.

pub mod artists;
pub mod auth;
pub mod player;

use std::time::Duration;

use reqwest::Client;

/// Shared HTTP client with an explicit per-request timeout.
///
/// Timeouts surface as [`crate::error::Error::Network`] and are retryable
/// on the next cycle, never fatal.
pub fn http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
}
