use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::get,
};
use chrono::{Duration, SecondsFormat, Utc};
use serde_json::{Value, json};

use playlog::management::SyncEngine;
use playlog::storage::Database;

/// Serves one canned recently-played page and per-id artist details,
/// counting hits on each route. With `artist_ok` false the artist route
/// returns 500 to simulate a failing detail fetch.
async fn spawn_api_server(page: Value, artist_ok: bool) -> (String, Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let plays_hits = Arc::new(AtomicUsize::new(0));
    let artist_hits = Arc::new(AtomicUsize::new(0));

    let plays_counter = Arc::clone(&plays_hits);
    let artist_counter = Arc::clone(&artist_hits);

    let app = Router::new()
        .route(
            "/me/player/recently-played",
            get(move || {
                let counter = Arc::clone(&plays_counter);
                let page = page.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Json(page)
                }
            }),
        )
        .route(
            "/artists/{id}",
            get(move |Path(id): Path<String>| {
                let counter = Arc::clone(&artist_counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    if artist_ok {
                        Ok(Json(json!({
                            "id": id,
                            "name": format!("Artist {}", id),
                            "genres": ["indie", "rock"],
                        })))
                    } else {
                        Err(StatusCode::INTERNAL_SERVER_ERROR)
                    }
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), plays_hits, artist_hits)
}

fn played_item(track_id: &str, artist_id: &str, minutes_ago: i64, duration_ms: i64) -> Value {
    let played_at = (Utc::now() - Duration::minutes(minutes_ago))
        .to_rfc3339_opts(SecondsFormat::Millis, true);
    json!({
        "track": {
            "id": track_id,
            "name": format!("{} name", track_id),
            "duration_ms": duration_ms,
            "artists": [{"id": artist_id, "name": "inline name"}],
        },
        "played_at": played_at,
    })
}

fn page(items: Vec<Value>) -> Value {
    json!({
        "items": items,
        "cursors": {"after": null, "before": null},
        "next": null,
    })
}

#[tokio::test]
async fn test_sync_inserts_plays_and_refreshes_artist() {
    let items = vec![
        played_item("t1", "a1", 90, 180_000),
        played_item("t2", "a1", 30, 200_000),
    ];
    let (api_url, plays_hits, artist_hits) = spawn_api_server(page(items), true).await;

    let db = Database::open_in_memory().unwrap();
    db.set_checkpoint((Utc::now() - Duration::hours(26)).timestamp_millis())
        .unwrap();
    let before_ms = Utc::now().timestamp_millis();

    let engine = SyncEngine::new(&db, api_url);
    let summary = engine.sync_recent_plays("test-token").await.unwrap();

    assert_eq!(summary.fetched, 2);
    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.artists_updated, 1);

    assert_eq!(db.count_plays().unwrap(), 2);
    assert_eq!(db.count_artists().unwrap(), 1);
    assert_eq!(
        db.genres_for_artist("a1").unwrap(),
        vec!["indie".to_string(), "rock".to_string()]
    );

    // One page requested, one detail fetch for the single distinct artist
    assert_eq!(plays_hits.load(Ordering::SeqCst), 1);
    assert_eq!(artist_hits.load(Ordering::SeqCst), 1);

    // Checkpoint advanced to "now"
    assert!(db.checkpoint().unwrap().unwrap() >= before_ms);
}

#[tokio::test]
async fn test_artist_failure_does_not_block_play_insertion() {
    let items = vec![
        played_item("t1", "a1", 90, 180_000),
        played_item("t2", "a1", 30, 200_000),
    ];
    let (api_url, _plays_hits, artist_hits) = spawn_api_server(page(items), false).await;

    let db = Database::open_in_memory().unwrap();
    let engine = SyncEngine::new(&db, api_url);
    let summary = engine.sync_recent_plays("test-token").await.unwrap();

    // Plays are committed even though the artist lookup kept failing
    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.artists_updated, 0);
    assert_eq!(db.count_plays().unwrap(), 2);
    assert_eq!(db.count_artists().unwrap(), 0);
    assert!(artist_hits.load(Ordering::SeqCst) >= 1);

    // The cycle itself succeeded, so the checkpoint still advances
    assert!(db.checkpoint().unwrap().is_some());
}

#[tokio::test]
async fn test_empty_page_counts_as_caught_up() {
    let (api_url, plays_hits, artist_hits) = spawn_api_server(page(vec![]), true).await;

    let db = Database::open_in_memory().unwrap();
    let before_ms = Utc::now().timestamp_millis();

    let engine = SyncEngine::new(&db, api_url);
    let summary = engine.sync_recent_plays("test-token").await.unwrap();

    assert_eq!(summary, Default::default());
    assert_eq!(plays_hits.load(Ordering::SeqCst), 1);
    assert_eq!(artist_hits.load(Ordering::SeqCst), 0);

    // Caught up still advances the checkpoint
    assert!(db.checkpoint().unwrap().unwrap() >= before_ms);
}

#[tokio::test]
async fn test_repeated_sync_is_idempotent() {
    let items = vec![
        played_item("t1", "a1", 90, 180_000),
        played_item("t2", "a2", 30, 200_000),
    ];
    let (api_url, _plays_hits, _artist_hits) = spawn_api_server(page(items), true).await;

    let db = Database::open_in_memory().unwrap();
    let engine = SyncEngine::new(&db, api_url);

    let first = engine.sync_recent_plays("test-token").await.unwrap();
    assert_eq!(first.inserted, 2);

    // The stub returns the same page again; storage-level dedup absorbs it
    let second = engine.sync_recent_plays("test-token").await.unwrap();
    assert_eq!(second.fetched, 2);
    assert_eq!(second.inserted, 0);
    assert_eq!(db.count_plays().unwrap(), 2);
}
