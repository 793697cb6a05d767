use std::time::Duration;

use rand::Rng;
use serde_json::Value;
use tokio::time::sleep;

use crate::{
    Error, Res,
    config::Config,
    debug,
    lastfm::{Params, Transport, signature},
    types::{BatchEntry, Scrobble, TrackSelection},
    utils,
};

/// Pause between two submissions of a batch.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Builds the signed `track.scrobble` parameters for one scrobble.
///
/// `album` is only added when it is present and non-empty; an absent album
/// never turns into an empty `album` field.
pub fn scrobble_params(config: &Config, session_key: &str, scrobble: &Scrobble) -> Params {
    let mut params = Params::from([
        ("method".to_string(), "track.scrobble".to_string()),
        ("api_key".to_string(), config.api_key.clone()),
        ("sk".to_string(), session_key.to_string()),
        ("artist".to_string(), scrobble.artist.clone()),
        ("track".to_string(), scrobble.track.clone()),
        ("timestamp".to_string(), scrobble.timestamp.to_string()),
        ("format".to_string(), "json".to_string()),
    ]);
    if let Some(album) = scrobble.album.as_deref().filter(|a| !a.is_empty()) {
        params.insert("album".to_string(), album.to_string());
    }
    signature::sign_into(&mut params, &config.api_secret);
    params
}

/// Submits a single scrobble as a signed POST request.
///
/// # Returns
///
/// The decoded JSON body, uninterpreted. Last.fm API errors (for example an
/// invalid session key) arrive as an `Ok` body with an `error` field; see
/// [`crate::types::ScrobbleOutcome`] for a readable classification.
///
/// # Errors
///
/// Returns [`Error::Transport`] if the request fails or the body is not JSON.
///
/// # Example
///
/// ```
/// let scrobble = Scrobble {
///     artist: "Portishead".into(),
///     track: "Roads".into(),
///     album: Some("Dummy".into()),
///     timestamp: chrono::Utc::now().timestamp() - 60,
/// };
/// let response = submit(&transport, &config, &session_key, &scrobble).await?;
/// ```
pub async fn submit<T: Transport + ?Sized>(
    transport: &T,
    config: &Config,
    session_key: &str,
    scrobble: &Scrobble,
) -> Res<Value> {
    let params = scrobble_params(config, session_key, scrobble);
    let body = transport.post(&params).await?;
    debug!("response: {}", body);
    Ok(body)
}

/// Options of a scrobble batch.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Number of scrobbles to submit.
    pub count: usize,
    /// Pause between submissions. Zero disables it.
    pub delay: Duration,
    /// Unix time the timestamps count back from.
    pub started_at: i64,
}

impl BatchOptions {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            delay: DEFAULT_DELAY,
            started_at: chrono::Utc::now().timestamp(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Counts of a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Submissions that got a decoded response back.
    pub submitted: usize,
    /// Submissions that failed in transport.
    pub failed: usize,
}

/// Submits `options.count` scrobbles of `artist` one after another.
///
/// The i-th scrobble is stamped `started_at - (count - i) * 60`, so the
/// history ends one minute before the batch started. The track of each
/// iteration comes from `selection`.
///
/// Each iteration is passed to `report` as soon as its response arrives and
/// is dropped afterwards. A failed submission is reported like any other and
/// the batch moves on to the next one.
///
/// # Errors
///
/// Returns [`Error::Input`] before sending anything if `selection` has no
/// track to offer, or if the earliest timestamp of the batch does not fit
/// in an `i64`.
///
/// # Example
///
/// ```
/// let selection = TrackSelection::sampled(tracks);
/// let summary = submit_batch(
///     &transport, &config, &session_key, "Portishead", &selection,
///     &BatchOptions::new(10), &mut rand::rng(), |entry| println!("{:?}", entry.result),
/// ).await?;
/// ```
#[allow(clippy::too_many_arguments)]
pub async fn submit_batch<T, R, F>(
    transport: &T,
    config: &Config,
    session_key: &str,
    artist: &str,
    selection: &TrackSelection,
    options: &BatchOptions,
    rng: &mut R,
    mut report: F,
) -> Res<BatchSummary>
where
    T: Transport + ?Sized,
    R: Rng + ?Sized,
    F: FnMut(&BatchEntry),
{
    if selection.is_empty() {
        return Err(Error::Input("no tracks to choose from".to_string()));
    }
    if options.count > 0 {
        utils::batch_timestamp(options.started_at, options.count, 0)?;
    }

    let mut summary = BatchSummary::default();
    for index in 0..options.count {
        let Some((track, album)) = selection.pick(rng) else {
            break;
        };
        let scrobble = Scrobble {
            artist: artist.to_string(),
            track,
            album,
            timestamp: utils::batch_timestamp(options.started_at, options.count, index)?,
        };

        debug!(
            "scrobble {}/{}: {} - {} @ {}",
            index + 1,
            options.count,
            scrobble.artist,
            scrobble.track,
            scrobble.timestamp
        );
        let result = submit(transport, config, session_key, &scrobble).await;
        match &result {
            Ok(_) => summary.submitted += 1,
            Err(_) => summary.failed += 1,
        }
        report(&BatchEntry {
            index,
            total: options.count,
            scrobble,
            result,
        });

        if !options.delay.is_zero() && index + 1 < options.count {
            sleep(options.delay).await;
        }
    }

    Ok(summary)
}
