use reqwest::Client;

use crate::{Res, types::Artist};

/// Retrieves full details (name, genres) for a single artist.
///
/// Called best-effort from within a sync cycle; a failure here never blocks
/// play insertion or the other artists' fetches. An artist with an empty
/// genre list is valid data.
pub async fn get_artist_details(
    client: &Client,
    api_url: &str,
    token: &str,
    artist_id: &str,
) -> Res<Artist> {
    let url = format!("{uri}/artists/{id}", uri = api_url, id = artist_id);

    let artist = client
        .get(&url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?
        .json::<Artist>()
        .await?;

    Ok(artist)
}
