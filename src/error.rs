use thiserror::Error;

/// Error taxonomy for the sync and token subsystems.
///
/// None of these variants is fatal to the process. `AuthRequired` tells the
/// caller to send the user back through `playlog auth`; everything else is
/// non-fatal and eligible for a caller-driven retry on the next invocation.
#[derive(Debug, Error)]
pub enum Error {
    /// No usable access token and no refresh token to mint one with.
    #[error("authorization required, run `playlog auth`")]
    AuthRequired,

    /// Request or transport failure. Decode failures from a response body
    /// that never parsed as JSON also surface here via reqwest.
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// A response body parsed as JSON but not into the expected shape.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A timestamp in a response was not valid RFC 3339.
    #[error("invalid timestamp in response: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("credential store error: {0}")]
    Credentials(String),

    #[error("{0}")]
    Config(String),
}

impl From<keyring::Error> for Error {
    fn from(err: keyring::Error) -> Self {
        Error::Credentials(err.to_string())
    }
}
