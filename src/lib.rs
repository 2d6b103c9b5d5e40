//! Spotify Listening History Tracker Library
//!
//! This library provides functionality for syncing and analyzing a single
//! user's Spotify listening history. It includes modules for API
//! communication, CLI operations, configuration management, durable storage,
//! and windowed listening statistics.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared across the crate
//! - `management` - Token lifecycle, credential storage, and incremental sync
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `storage` - SQLite persistence and aggregation queries
//! - `types` - Data structures and type definitions
//! - `utils` - PKCE helpers and report window arithmetic
//!
//! # Example
//!
//! ```
//! use playlog::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> playlog::Res<()> {
//!     config::load_env().await?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod storage;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// All fallible operations in the library report failures through the
/// [`error::Error`] taxonomy; nothing below the CLI layer terminates the
/// process. The worst case an error represents is that the user has to
/// re-authorize.
///
/// # Example
///
/// ```
/// use playlog::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, error::Error>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Starting sync...");
/// info!("Fetched {} plays", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used to provide positive feedback when operations complete successfully.
///
/// # Example
///
/// ```
/// success!("Sync complete");
/// success!("Inserted {} plays", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Immediately terminates the program with exit code 1 after printing. Only
/// the CLI command layer uses this; library code propagates errors through
/// [`Res`] instead.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues or important information that users should
/// notice, like a skipped artist-detail fetch during sync.
///
/// # Example
///
/// ```
/// warning!("Artist lookup failed for {}, continuing", artist_id);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
