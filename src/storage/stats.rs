use rusqlite::{OptionalExtension, params};

use crate::{Res, types::RecentTrack, utils::Window};

use super::Database;

/// Name of the artist with the most plays in the window, ties broken by
/// whichever the grouping yields first. `None` when the window has no plays.
pub fn top_artist(db: &Database, window: &Window) -> Res<Option<String>> {
    let name = db
        .conn()
        .query_row(
            "SELECT a.name, COUNT(*) AS play_count
             FROM plays AS p
             JOIN artists AS a ON p.artist_id = a.artist_id
             WHERE p.played_at >= ?1 AND p.played_at <= ?2
             GROUP BY p.artist_id
             ORDER BY play_count DESC
             LIMIT 1",
            params![window.start_ms, window.end_ms],
            |row| row.get(0),
        )
        .optional()?;
    Ok(name)
}

/// Most-played genre in the window. An artist with N genres contributes one
/// play-count unit to each of them, so genre totals can exceed total plays.
pub fn top_genre(db: &Database, window: &Window) -> Res<Option<String>> {
    let genre = db
        .conn()
        .query_row(
            "SELECT g.genre, COUNT(*) AS play_count
             FROM plays AS p
             JOIN artist_genres AS g ON p.artist_id = g.artist_id
             WHERE p.played_at >= ?1 AND p.played_at <= ?2
             GROUP BY g.genre
             ORDER BY play_count DESC
             LIMIT 1",
            params![window.start_ms, window.end_ms],
            |row| row.get(0),
        )
        .optional()?;
    Ok(genre)
}

/// Total listening time in the window, in milliseconds.
///
/// A play's counted duration is cut off where the next play starts, so
/// back-to-back and skipped tracks don't inflate the total. The last play in
/// the window always counts its full duration.
pub fn total_listening_time(db: &Database, window: &Window) -> Res<i64> {
    let total: Option<i64> = db.conn().query_row(
        "WITH ordered_plays AS (
             SELECT
                 played_at,
                 duration_ms,
                 LEAD(played_at) OVER (ORDER BY played_at) AS next_played_at
             FROM plays
             WHERE played_at >= ?1 AND played_at <= ?2
         )
         SELECT SUM(
             CASE
                 WHEN next_played_at IS NOT NULL AND next_played_at < played_at + duration_ms
                     THEN (next_played_at - played_at)
                 ELSE duration_ms
             END
         )
         FROM ordered_plays",
        params![window.start_ms, window.end_ms],
        |row| row.get(0),
    )?;
    Ok(total.unwrap_or(0))
}

/// Recent tracks in the window, newest first, capped at `limit`.
///
/// Artist names come from a LEFT JOIN: a play whose artist-detail fetch
/// never succeeded still lists, under its raw artist id.
pub fn recent_tracks(db: &Database, window: &Window, limit: u32) -> Res<Vec<RecentTrack>> {
    let mut stmt = db.conn().prepare(
        "SELECT p.track_name, COALESCE(a.name, p.artist_id), p.played_at
         FROM plays AS p
         LEFT JOIN artists AS a ON p.artist_id = a.artist_id
         WHERE p.played_at >= ?1 AND p.played_at <= ?2
         ORDER BY p.played_at DESC
         LIMIT ?3",
    )?;

    let tracks = stmt
        .query_map(params![window.start_ms, window.end_ms, limit], |row| {
            Ok(RecentTrack {
                track_name: row.get(0)?,
                artist_name: row.get(1)?,
                played_at_ms: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(tracks)
}
