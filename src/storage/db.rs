use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use crate::{
    Res,
    types::{Artist, PlayRecord},
};

const CHECKPOINT_KEY: &str = "last_fetch_ms";

const DB_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS plays (
        played_at INTEGER PRIMARY KEY,
        track_id TEXT NOT NULL,
        track_name TEXT NOT NULL,
        artist_id TEXT NOT NULL,
        duration_ms INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS artists (
        artist_id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        last_updated INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS artist_genres (
        artist_id TEXT NOT NULL,
        genre TEXT NOT NULL,
        FOREIGN KEY(artist_id) REFERENCES artists(artist_id)
    );

    CREATE TABLE IF NOT EXISTS sync_state (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
"#;

/// SQLite-backed store for plays, artist metadata, and the sync checkpoint.
///
/// The sync engine is the only writer; report queries in [`super::stats`]
/// read the same tables. `plays.played_at` (epoch ms) is the primary key,
/// so duplicate suppression happens at the storage layer rather than by
/// check-then-insert.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new<P: AsRef<Path>>(path: P) -> Res<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| crate::error::Error::Config(e.to_string()))?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(DB_SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Res<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(DB_SCHEMA)?;
        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Inserts a play, returning whether a new row was written. A play at an
    /// already-recorded instant is silently skipped.
    pub fn insert_play(&self, play: &PlayRecord) -> Res<bool> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO plays (played_at, track_id, track_name, artist_id, duration_ms)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                play.played_at_ms,
                play.track_id,
                play.track_name,
                play.artist_id,
                play.duration_ms
            ],
        )?;
        Ok(changed == 1)
    }

    /// Upserts an artist row and replaces its genre associations wholesale.
    ///
    /// Genres are never patched incrementally; the association set always
    /// reflects the most recent successful detail fetch.
    pub fn upsert_artist_details(&self, artist: &Artist, now_ms: i64) -> Res<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO artists (artist_id, name, last_updated)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(artist_id) DO UPDATE SET
                name=excluded.name,
                last_updated=excluded.last_updated",
            params![artist.id, artist.name, now_ms],
        )?;

        tx.execute(
            "DELETE FROM artist_genres WHERE artist_id = ?1",
            params![artist.id],
        )?;
        for genre in &artist.genres {
            tx.execute(
                "INSERT INTO artist_genres (artist_id, genre) VALUES (?1, ?2)",
                params![artist.id, genre],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// The last successful fetch time in epoch ms, if a sync ever completed.
    pub fn checkpoint(&self) -> Res<Option<i64>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM sync_state WHERE key = ?1",
                params![CHECKPOINT_KEY],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value.and_then(|v| v.parse::<i64>().ok()))
    }

    pub fn set_checkpoint(&self, ts_ms: i64) -> Res<()> {
        self.conn.execute(
            "INSERT INTO sync_state (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![CHECKPOINT_KEY, ts_ms.to_string()],
        )?;
        Ok(())
    }

    pub fn count_plays(&self) -> Res<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM plays", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn count_artists(&self) -> Res<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM artists", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Genres currently associated with an artist, for inspection and tests.
    pub fn genres_for_artist(&self, artist_id: &str) -> Res<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT genre FROM artist_genres WHERE artist_id = ?1 ORDER BY genre")?;
        let genres = stmt
            .query_map(params![artist_id], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(genres)
    }
}
