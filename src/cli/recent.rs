use tabled::Table;

use crate::{
    config, error, info,
    storage::{self, Database},
    types::RecentTrackRow,
    utils::{self, Window},
};

pub async fn recent(window: Window, limit: u32) {
    let db = match Database::new(config::db_path()) {
        Ok(db) => db,
        Err(e) => error!("Failed to open database. Err: {}", e),
    };

    match storage::recent_tracks(&db, &window, limit) {
        Ok(tracks) => {
            if tracks.is_empty() {
                info!("No plays recorded in this window. Run playlog sync first.");
                return;
            }

            let rows: Vec<RecentTrackRow> = tracks
                .into_iter()
                .map(|t| RecentTrackRow {
                    played: utils::format_played_at(t.played_at_ms),
                    track: t.track_name,
                    artist: t.artist_name,
                })
                .collect();

            let table = Table::new(rows);
            println!("{}", table);
        }
        Err(e) => error!("Failed to load recent tracks. Err: {}", e),
    }
}
