use serde_json::Value;

use crate::{
    config::Config,
    debug,
    lastfm::{Params, Transport},
    types::TopTracksResponse,
    warning,
};

/// Largest `limit` accepted by `artist.getTopTracks`.
pub const MAX_LIMIT: u32 = 1000;

/// Retrieves the names of an artist's top tracks, most popular first.
///
/// Sends an unsigned `artist.getTopTracks` request with server-side
/// autocorrection of the artist name. `limit` is capped at 1000.
///
/// # Returns
///
/// The track names in the order Last.fm returns them. The list is empty
/// when the response carries an `error` field, when `toptracks.track` is
/// missing, or when the request itself fails. Each case is reported as a
/// warning; none of them is an error, so callers decide what an empty list
/// means for them.
///
/// # Example
///
/// ```
/// let tracks = top_tracks(&transport, &config, "Massive Attack", 50).await;
/// if tracks.is_empty() {
///     warning!("Could not find top tracks for that artist.");
/// }
/// ```
pub async fn top_tracks<T: Transport + ?Sized>(
    transport: &T,
    config: &Config,
    artist: &str,
    limit: u32,
) -> Vec<String> {
    let params = Params::from([
        ("method".to_string(), "artist.getTopTracks".to_string()),
        ("artist".to_string(), artist.to_string()),
        ("api_key".to_string(), config.api_key.clone()),
        ("format".to_string(), "json".to_string()),
        ("autocorrect".to_string(), "1".to_string()),
        ("limit".to_string(), limit.min(MAX_LIMIT).to_string()),
    ]);

    let body = match transport.get(&params).await {
        Ok(body) => body,
        Err(e) => {
            warning!("Error fetching top tracks: {}", e);
            return Vec::new();
        }
    };

    if let Some(code) = body.get("error") {
        warning!(
            "Last.fm API error ({}): {}",
            code,
            body.get("message").and_then(Value::as_str).unwrap_or_default()
        );
        return Vec::new();
    }

    let tracks = serde_json::from_value::<TopTracksResponse>(body)
        .ok()
        .and_then(|r| r.toptracks)
        .and_then(|t| t.track);
    let Some(tracks) = tracks else {
        warning!("Unexpected API response format. Could not find 'toptracks.track' in response.");
        return Vec::new();
    };

    let names: Vec<String> = tracks.into_vec().into_iter().map(|t| t.name).collect();
    debug!("found {} top tracks for {}", names.len(), artist);
    names
}
