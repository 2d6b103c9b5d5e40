use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{Res, types::RecentlyPlayedResponse};

const MAX_RETRIES: u32 = 3;

/// Retrieves one page of the user's recently-played feed.
///
/// `after_ms` is the provider-side pagination cursor: only plays that
/// started strictly after that epoch-ms instant are returned, oldest first,
/// up to `limit` (provider max 50).
///
/// # Retry Logic
///
/// 502 Bad Gateway responses are retried up to three times with a 10-second
/// delay, matching the provider's transient gateway hiccups. Every other
/// error propagates immediately and leaves the caller's checkpoint
/// untouched.
pub async fn recently_played(
    client: &Client,
    api_url: &str,
    token: &str,
    limit: u32,
    after_ms: i64,
) -> Res<RecentlyPlayedResponse> {
    let url = format!(
        "{uri}/me/player/recently-played?limit={limit}&after={after}",
        uri = api_url,
        limit = limit,
        after = after_ms
    );

    let mut attempt = 0;
    loop {
        let response = client.get(&url).bearer_auth(token).send().await;

        let response = match response {
            Ok(resp) => match resp.error_for_status() {
                Ok(valid_response) => valid_response,
                Err(err) => {
                    if let Some(status) = err.status() {
                        if status == StatusCode::BAD_GATEWAY && attempt < MAX_RETRIES {
                            attempt += 1;
                            sleep(Duration::from_secs(10)).await;
                            continue; // retry
                        }
                    }
                    return Err(err.into()); // propagate other errors
                }
            },
            Err(err) => {
                return Err(err.into());
            } // network or reqwest error
        };

        let page = response.json::<RecentlyPlayedResponse>().await?;
        return Ok(page);
    }
}
