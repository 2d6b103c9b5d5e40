//! # API Module
//!
//! HTTP endpoints for the short-lived local server that backs the OAuth
//! authorization flow.
//!
//! - [`callback`] - receives Spotify's authorization redirect and hands the
//!   full redirect URL to the token manager, which extracts the code and
//!   completes the PKCE exchange
//! - [`health`] - a status endpoint for checking the callback server is up
//!
//! Built on [Axum](https://docs.rs/axum); the token manager is shared with
//! the handlers through an `Extension` layer.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
