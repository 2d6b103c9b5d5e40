use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config, error,
    management::{KeyringStore, SyncEngine, TokenManager},
    storage::Database,
    success,
};

pub async fn sync() {
    let mut token_mgr = match TokenManager::load(config::auth_config(), Box::new(KeyringStore)) {
        Ok(t) => t,
        Err(e) => error!("Failed to load credentials. Err: {}", e),
    };

    if !token_mgr.ensure_valid_token().await {
        error!("Authorization required. Please run playlog auth");
    }
    let Some(token) = token_mgr.access_token() else {
        error!("Authorization required. Please run playlog auth");
    };

    let db = match Database::new(config::db_path()) {
        Ok(db) => db,
        Err(e) => error!("Failed to open database. Err: {}", e),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Syncing recent plays...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let engine = SyncEngine::new(&db, config::spotify_api_url());
    match engine.sync_recent_plays(token).await {
        Ok(summary) => {
            pb.finish_and_clear();
            success!(
                "Fetched {} plays: {} new, {} artists refreshed.",
                summary.fetched,
                summary.inserted,
                summary.artists_updated
            );
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Sync failed: {}", e);
        }
    }
}
