//! Configuration management for the listening history tracker.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. Public Spotify endpoints carry
//! defaults so a fresh install only needs the application's client ID and
//! redirect URI.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (public endpoints, scope, server address)

use std::{env, path::PathBuf};

use crate::Res;

/// OAuth endpoint and client settings for the token lifecycle.
///
/// Built from the environment by [`auth_config`]; tests construct it
/// directly and point the URLs at a local stub server.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from `playlog/.env` in the platform-specific local
/// data directory:
/// - Linux: `~/.local/share/playlog/.env`
/// - macOS: `~/Library/Application Support/playlog/.env`
/// - Windows: `%LOCALAPPDATA%/playlog/.env`
///
/// A missing `.env` file is not an error; everything can come from the
/// process environment instead.
pub async fn load_env() -> Res<()> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playlog/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| crate::error::Error::Config(e.to_string()))?;
    }

    if path.is_file() {
        dotenv::from_path(path).map_err(|e| crate::error::Error::Config(e.to_string()))?;
    }
    Ok(())
}

/// Returns the server address for the local OAuth callback server.
///
/// Defaults to `127.0.0.1:8888`, matching the default redirect URI
/// registered for the application.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8888".to_string())
}

/// Returns the Spotify API client ID for authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_ID` environment variable is not set. There
/// is no default; the ID comes from the application's registration on the
/// Spotify developer dashboard.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").expect("SPOTIFY_CLIENT_ID must be set")
}

/// Returns the Spotify OAuth redirect URI.
///
/// This must match the redirect URI registered in the Spotify application
/// settings and point at the local callback server.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_REDIRECT_URI")
        .unwrap_or_else(|_| format!("http://{}/callback", server_addr()))
}

/// Returns the Spotify API scope permissions.
///
/// Reading the recently-played feed is the only permission the tracker
/// needs.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_SCOPE").unwrap_or_else(|_| "user-read-recently-played".to_string())
}

/// Returns the Spotify OAuth authorization URL.
pub fn spotify_auth_url() -> String {
    env::var("SPOTIFY_AUTH_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/authorize".to_string())
}

/// Returns the Spotify OAuth token exchange URL.
pub fn spotify_token_url() -> String {
    env::var("SPOTIFY_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the Spotify Web API base URL.
pub fn spotify_api_url() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Assembles the OAuth configuration from the environment.
pub fn auth_config() -> AuthConfig {
    AuthConfig {
        client_id: spotify_client_id(),
        redirect_uri: spotify_redirect_uri(),
        scope: spotify_scope(),
        auth_url: spotify_auth_url(),
        token_url: spotify_token_url(),
    }
}

/// Returns the path of the listening history database.
///
/// Defaults to `playlog/music_data.sqlite3` in the platform-specific local
/// data directory; override with `PLAYLOG_DB_PATH`.
pub fn db_path() -> PathBuf {
    if let Ok(p) = env::var("PLAYLOG_DB_PATH") {
        return PathBuf::from(p);
    }
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playlog/music_data.sqlite3");
    path
}
