//! # CLI Module
//!
//! User-facing command implementations. Each command wires the management
//! and storage services together, handles progress feedback, and presents
//! errors; all real work happens in the layers below.
//!
//! - [`auth`] - OAuth 2.0 PKCE authorization flow with the local callback
//!   server
//! - [`sync`] - incremental sync of recently-played history into the local
//!   database
//! - [`stats`] - windowed listening report (listening time, top artist,
//!   top genre)
//! - [`recent`] - table of recent tracks in a window
//! - [`logout`] - clear token state and stored credentials
//!
//! The command layer is the only place that terminates the process on
//! failure; everything below reports errors through [`crate::Res`].

mod auth;
mod logout;
mod recent;
mod stats;
mod sync;

pub use auth::auth;
pub use logout::logout;
pub use recent::recent;
pub use stats::stats;
pub use sync::sync;
