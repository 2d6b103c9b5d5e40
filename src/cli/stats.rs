use tabled::Table;

use crate::{
    config, error,
    storage::{self, Database},
    types::StatRow,
    utils::{self, Window},
};

pub async fn stats(window: Window) {
    let db = match Database::new(config::db_path()) {
        Ok(db) => db,
        Err(e) => error!("Failed to open database. Err: {}", e),
    };

    let listening_ms = match storage::total_listening_time(&db, &window) {
        Ok(ms) => ms,
        Err(e) => error!("Failed to calculate listening time. Err: {}", e),
    };
    let top_artist = match storage::top_artist(&db, &window) {
        Ok(artist) => artist,
        Err(e) => error!("Failed to calculate top artist. Err: {}", e),
    };
    let top_genre = match storage::top_genre(&db, &window) {
        Ok(genre) => genre,
        Err(e) => error!("Failed to calculate top genre. Err: {}", e),
    };

    let rows = vec![
        StatRow {
            metric: "Listening time".to_string(),
            value: format!("{:.1} hrs", utils::ms_to_hours(listening_ms)),
        },
        StatRow {
            metric: "Top artist".to_string(),
            value: top_artist.unwrap_or_else(|| "-".to_string()),
        },
        StatRow {
            metric: "Top genre".to_string(),
            value: top_genre.unwrap_or_else(|| "-".to_string()),
        },
    ];

    let table = Table::new(rows);
    println!("{}", table);
}
