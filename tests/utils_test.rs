use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use playlog::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only characters from the RFC 7636 unreserved set
    assert!(
        verifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~'))
    );

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_generate_code_challenge_rfc_vector() {
    // Appendix B of RFC 7636
    let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
    let challenge = generate_code_challenge(verifier);
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_extract_query_param() {
    let url = "http://127.0.0.1:8888/callback?code=abc123&state=xyz";

    assert_eq!(extract_query_param(url, "code"), Some("abc123".to_string()));
    assert_eq!(extract_query_param(url, "state"), Some("xyz".to_string()));

    // Missing parameter
    assert_eq!(extract_query_param(url, "error"), None);

    // No query string at all
    assert_eq!(extract_query_param("http://127.0.0.1:8888/callback", "code"), None);

    // Empty value counts as absent
    assert_eq!(
        extract_query_param("http://localhost/callback?code=", "code"),
        None
    );
}

#[test]
fn test_window_yesterday() {
    let now = Utc.with_ymd_and_hms(2025, 8, 6, 15, 30, 0).unwrap();
    let window = Window::yesterday(now);

    let start = Utc.with_ymd_and_hms(2025, 8, 5, 0, 0, 0).unwrap();
    assert_eq!(window.start_ms, start.timestamp_millis());

    // End should be the last millisecond of August 5th
    let end = Utc
        .with_ymd_and_hms(2025, 8, 6, 0, 0, 0)
        .unwrap()
        .timestamp_millis()
        - 1;
    assert_eq!(window.end_ms, end);

    // A play at noon yesterday is inside, one today is not
    assert!(window.contains(
        Utc.with_ymd_and_hms(2025, 8, 5, 12, 0, 0)
            .unwrap()
            .timestamp_millis()
    ));
    assert!(!window.contains(now.timestamp_millis()));
}

#[test]
fn test_window_last_days() {
    let now = Utc.with_ymd_and_hms(2025, 8, 6, 12, 0, 0).unwrap();
    let window = Window::last_days(now, 7);

    assert_eq!(window.end_ms, now.timestamp_millis());
    assert_eq!(
        window.end_ms - window.start_ms,
        7 * 24 * 60 * 60 * 1000
    );

    // Both boundaries are inclusive
    assert!(window.contains(window.start_ms));
    assert!(window.contains(window.end_ms));
    assert!(!window.contains(window.end_ms + 1));
}

#[test]
fn test_window_between() {
    let start = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 7, 31).unwrap();
    let window = Window::between(start, end);

    let first = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
    assert_eq!(window.start_ms, first.timestamp_millis());

    // 23:59:59.999 on the last day
    let last = Utc.with_ymd_and_hms(2025, 7, 31, 23, 59, 59).unwrap();
    assert_eq!(window.end_ms, last.timestamp_millis() + 999);

    // Single-day windows are valid
    let day = Window::between(start, start);
    assert!(day.start_ms < day.end_ms);
}

#[test]
fn test_get_date_from_string() {
    // Test valid date string
    let valid_date = get_date_from_string(Some("2023-10-17".to_string()));
    let expected = NaiveDate::from_ymd_opt(2023, 10, 17).unwrap();
    assert_eq!(valid_date, expected);

    // Test None input (should return current date)
    let current_date = get_date_from_string(None);
    let today = Utc::now().date_naive();
    assert_eq!(current_date, today);

    // Test invalid date string (should return current date)
    let invalid_date = get_date_from_string(Some("invalid-date".to_string()));
    assert_eq!(invalid_date.year(), today.year());
}

#[test]
fn test_ms_to_hours() {
    assert_eq!(ms_to_hours(3_600_000), 1.0);
    assert_eq!(ms_to_hours(0), 0.0);
    assert!((ms_to_hours(5_400_000) - 1.5).abs() < f64::EPSILON);
}

#[test]
fn test_format_played_at() {
    let ts = Utc
        .with_ymd_and_hms(2025, 8, 5, 9, 41, 0)
        .unwrap()
        .timestamp_millis();
    assert_eq!(format_played_at(ts), "2025-08-05 09:41");
}
