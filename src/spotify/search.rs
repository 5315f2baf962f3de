use std::fmt;

use reqwest::{Client, StatusCode};

use crate::types::{SearchResponse, TrackMatch};

#[derive(Debug)]
pub enum SearchError {
    Http(reqwest::Error),
    Status(StatusCode),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Http(e) => write!(f, "{}", e),
            SearchError::Status(status) => write!(f, "search returned {}", status),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Http(err)
    }
}

/// Looks up the best matching track for a free-text query.
///
/// Sends `GET {api_url}/search` with `q`, `type=track` and `limit=1` using
/// the bearer token. No matching is done locally; the first item Spotify
/// returns is taken as the answer.
///
/// # Returns
///
/// - `Ok(Some(TrackMatch))` - url, name and primary artist of the top hit
/// - `Ok(None)` - the search succeeded but returned no tracks
///
/// # Errors
///
/// [`SearchError::Status`] for a non-success status, [`SearchError::Http`]
/// for network or decoding failures. Both are per-query failures.
///
/// # Example
///
/// ```
/// let hit = search_track("https://api.spotify.com/v1", &token, "Imagine").await?;
/// if let Some(track) = hit {
///     println!("{} - {}", track.name, track.artist);
/// }
/// ```
pub async fn search_track(
    api_url: &str,
    token: &str,
    query: &str,
) -> Result<Option<TrackMatch>, SearchError> {
    let client = Client::new();
    let response = client
        .get(format!("{uri}/search", uri = api_url))
        .bearer_auth(token)
        .query(&[("q", query), ("type", "track"), ("limit", "1")])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SearchError::Status(status));
    }

    let res = response.json::<SearchResponse>().await?;
    Ok(res.tracks.items.into_iter().next().map(|track| TrackMatch {
        url: track.external_urls.spotify,
        name: track.name,
        artist: track
            .artists
            .first()
            .map(|a| a.name.clone())
            .unwrap_or_default(),
    }))
}
