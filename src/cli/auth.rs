use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::{
    config, error,
    management::{KeyringStore, TokenManager},
    server::start_api_server,
    success,
};

pub async fn auth() {
    let manager = Arc::new(Mutex::new(TokenManager::new(
        config::auth_config(),
        Box::new(KeyringStore),
    )));

    // start the callback server before sending the user to the browser
    let server_state = Arc::clone(&manager);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    manager.lock().await.start_authorization();

    if wait_for_authorization(&manager).await {
        success!("Authentication successful!");
    } else {
        error!("Authentication failed or timed out.");
    }
}

/// Polls until the callback handler has completed the code exchange, with
/// a 60-second timeout.
async fn wait_for_authorization(manager: &Arc<Mutex<TokenManager>>) -> bool {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        if manager.lock().await.is_authorized() {
            return true;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    false
}
