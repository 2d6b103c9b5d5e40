use std::collections::BTreeSet;

use chrono::{Duration, Utc};
use futures::{StreamExt, stream};
use reqwest::Client;

use crate::{
    Res, spotify,
    storage::Database,
    types::{PlayRecord, SyncSummary},
    warning,
};

/// Provider maximum for one recently-played page.
const PAGE_LIMIT: u32 = 50;

/// Bound on catch-up paging within one cycle.
const MAX_PAGES: u32 = 20;

/// Cap on concurrent artist-detail fetches.
const ARTIST_FETCH_CONCURRENCY: usize = 4;

/// Incremental sync of the recently-played feed into the local store.
///
/// The engine is the sole writer of plays, artist details, and the
/// checkpoint. Deduplication is storage-level: `plays.played_at` is the
/// primary key and inserts are `OR IGNORE`, so re-fetching an already-seen
/// window is idempotent.
pub struct SyncEngine<'a> {
    db: &'a Database,
    http: Client,
    api_url: String,
}

impl<'a> SyncEngine<'a> {
    pub fn new(db: &'a Database, api_url: String) -> Self {
        SyncEngine {
            db,
            http: spotify::http_client(),
            api_url,
        }
    }

    /// Fetches plays since the last checkpoint and persists them.
    ///
    /// The fetch window starts at the stored checkpoint, or 24 hours back
    /// when no sync has ever completed. Full pages advance the `after`
    /// cursor and fetching continues until a short page, so a long absence
    /// catches up in a single cycle.
    ///
    /// Artist details are refreshed best-effort for every distinct artist
    /// seen in the fetched items; an individual failure is logged and never
    /// blocks play insertion or the other artists.
    ///
    /// The checkpoint advances to "now" only when the cycle succeeds; a
    /// failed top-level fetch leaves it untouched so the next cycle retries
    /// the same window.
    pub async fn sync_recent_plays(&self, token: &str) -> Res<SyncSummary> {
        let now = Utc::now();
        let since_ms = match self.db.checkpoint()? {
            Some(ts) => ts,
            None => (now - Duration::hours(24)).timestamp_millis(),
        };

        let mut summary = SyncSummary::default();
        let mut plays: Vec<PlayRecord> = Vec::new();
        let mut after_ms = since_ms;

        for _ in 0..MAX_PAGES {
            let page = spotify::player::recently_played(
                &self.http,
                &self.api_url,
                token,
                PAGE_LIMIT,
                after_ms,
            )
            .await?;

            let page_len = page.items.len();
            summary.fetched += page_len;

            for item in &page.items {
                match PlayRecord::from_item(item) {
                    Ok(play) => plays.push(play),
                    Err(e) => warning!("Skipping play with malformed timestamp: {}", e),
                }
            }

            if page_len < PAGE_LIMIT as usize {
                break;
            }

            // next page starts after the newest play fetched so far
            let Some(newest) = plays.iter().map(|p| p.played_at_ms).max() else {
                break;
            };
            if newest <= after_ms {
                break; // cursor would not advance
            }
            after_ms = newest;
        }

        for play in &plays {
            if self.db.insert_play(play)? {
                summary.inserted += 1;
            }
        }

        let artist_ids: BTreeSet<String> = plays
            .iter()
            .filter(|p| p.artist_id != "unknown")
            .map(|p| p.artist_id.clone())
            .collect();
        summary.artists_updated = self.update_artist_details(token, artist_ids).await?;

        self.db.set_checkpoint(now.timestamp_millis())?;
        Ok(summary)
    }

    /// Refreshes details for each artist with bounded fan-out.
    ///
    /// Returns how many artists were upserted. Fetch failures are skipped;
    /// the genre associations of a successfully fetched artist are replaced
    /// wholesale.
    async fn update_artist_details(&self, token: &str, artist_ids: BTreeSet<String>) -> Res<usize> {
        let mut results = stream::iter(artist_ids.into_iter().map(|id| {
            let http = &self.http;
            let api_url = self.api_url.as_str();
            async move {
                let fetched = spotify::artists::get_artist_details(http, api_url, token, &id).await;
                (id, fetched)
            }
        }))
        .buffer_unordered(ARTIST_FETCH_CONCURRENCY);

        let now_ms = Utc::now().timestamp_millis();
        let mut updated = 0;
        while let Some((id, fetched)) = results.next().await {
            match fetched {
                Ok(artist) => {
                    self.db.upsert_artist_details(&artist, now_ms)?;
                    updated += 1;
                }
                Err(e) => warning!("Artist lookup failed for {}, continuing: {}", id, e),
            }
        }
        Ok(updated)
    }
}
