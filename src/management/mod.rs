mod credentials;
mod sync;
mod tokens;

pub use credentials::ACCOUNT_ACCESS_TOKEN;
pub use credentials::ACCOUNT_REFRESH_TOKEN;
pub use credentials::CredentialStore;
pub use credentials::KeyringStore;
pub use credentials::MemoryStore;
pub use credentials::SERVICE_SPOTIFY;
pub use sync::SyncEngine;
pub use tokens::TokenManager;
