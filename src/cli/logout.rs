use crate::{
    config, error,
    management::{KeyringStore, TokenManager},
    success,
};

pub async fn logout() {
    let mut token_mgr = match TokenManager::load(config::auth_config(), Box::new(KeyringStore)) {
        Ok(t) => t,
        Err(e) => error!("Failed to load credentials. Err: {}", e),
    };

    match token_mgr.logout() {
        Ok(()) => success!("Logged out. Stored credentials removed."),
        Err(e) => error!("Logout failed: {}", e),
    }
}
