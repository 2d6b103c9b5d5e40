use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};

/// Characters permitted in a PKCE code verifier (RFC 7636 unreserved set).
const VERIFIER_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-._~";

/// Generates a random 128-character PKCE code verifier.
pub fn generate_code_verifier() -> String {
    let mut rng = rand::rng();
    (0..128)
        .map(|_| {
            let idx = rng.random_range(0..VERIFIER_CHARSET.len());
            VERIFIER_CHARSET[idx] as char
        })
        .collect()
}

/// Derives the S256 code challenge: base64url(SHA-256(verifier)), no padding.
pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// An inclusive report window over play timestamps, in epoch milliseconds.
///
/// Constructors take `now` explicitly so window arithmetic stays a pure
/// function of its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl Window {
    /// The previous calendar day, midnight to 23:59:59.999 UTC.
    pub fn yesterday(now: DateTime<Utc>) -> Self {
        let day = now
            .date_naive()
            .pred_opt()
            .expect("date out of range");
        Self::between(day, day)
    }

    /// The trailing `days` days up to `now`.
    pub fn last_days(now: DateTime<Utc>, days: i64) -> Self {
        Window {
            start_ms: (now - Duration::days(days)).timestamp_millis(),
            end_ms: now.timestamp_millis(),
        }
    }

    /// From the start of `start` to the end of `end`, both UTC dates.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        let start_ms = start
            .and_hms_opt(0, 0, 0)
            .expect("valid midnight")
            .and_utc()
            .timestamp_millis();
        let end_ms = end
            .and_hms_milli_opt(23, 59, 59, 999)
            .expect("valid end of day")
            .and_utc()
            .timestamp_millis();
        Window { start_ms, end_ms }
    }

    pub fn contains(&self, ts_ms: i64) -> bool {
        ts_ms >= self.start_ms && ts_ms <= self.end_ms
    }
}

/// Extracts a single query parameter value from a URL string.
///
/// Values are assumed to be OAuth codes and tokens, which never contain
/// percent-encoded characters, so no decoding is performed.
pub fn extract_query_param(url: &str, name: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key == name && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Parses a `YYYY-MM-DD` date argument, falling back to today on bad or
/// missing input.
pub fn get_date_from_string(date: Option<String>) -> NaiveDate {
    match date {
        Some(date_str) => NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .unwrap_or_else(|_| Utc::now().date_naive()),
        None => Utc::now().date_naive(),
    }
}

/// Renders a millisecond total as fractional hours, e.g. `12.5`.
pub fn ms_to_hours(ms: i64) -> f64 {
    ms as f64 / 3_600_000.0
}

/// Renders an epoch-ms play timestamp for table output.
pub fn format_played_at(ts_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(ts_ms) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => ts_ms.to_string(),
    }
}
