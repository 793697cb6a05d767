use rand::{Rng, seq::IndexedRandom};
use serde::Deserialize;
use serde_json::Value;
use tabled::Tabled;

use crate::Res;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scrobble {
    pub artist: String,
    pub track: String,
    pub album: Option<String>,
    pub timestamp: i64,
}

/// How the batch loop picks the track for each iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackSelection {
    /// The same track (and album) every time.
    Explicit { track: String, album: Option<String> },
    /// A uniform random pick from the list, independently per iteration.
    Sampled { tracks: Vec<String> },
}

impl TrackSelection {
    pub fn explicit(track: impl Into<String>, album: Option<String>) -> Self {
        Self::Explicit {
            track: track.into(),
            album: album.filter(|a| !a.is_empty()),
        }
    }

    pub fn sampled(tracks: Vec<String>) -> Self {
        Self::Sampled { tracks }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Explicit { .. } => false,
            Self::Sampled { tracks } => tracks.is_empty(),
        }
    }

    /// Returns the `(track, album)` to submit next, or `None` for an empty
    /// sampled list.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(String, Option<String>)> {
        match self {
            Self::Explicit { track, album } => Some((track.clone(), album.clone())),
            Self::Sampled { tracks } => tracks.choose(rng).map(|t| (t.clone(), None)),
        }
    }
}

/// One iteration of a scrobble batch, handed to the reporter.
#[derive(Debug)]
pub struct BatchEntry {
    /// Zero-based position in the batch.
    pub index: usize,
    pub total: usize,
    pub scrobble: Scrobble,
    pub result: Res<Value>,
}

/// Readable classification of a `track.scrobble` response body.
///
/// Only used for reporting; a batch never changes course because of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrobbleOutcome {
    Accepted,
    Ignored { message: String },
    Rejected { code: i64, message: String },
}

impl ScrobbleOutcome {
    pub fn from_response(response: &Value) -> Self {
        if let Some(code) = response.get("error") {
            return Self::Rejected {
                code: code.as_i64().unwrap_or_default(),
                message: response
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            };
        }

        let ignored = response.pointer("/scrobbles/scrobble/ignoredMessage");
        let code = ignored.and_then(|m| m.get("code")).map(|c| match c {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
        match code {
            Some(code) if code != "0" => Self::Ignored {
                message: ignored
                    .and_then(|m| m.get("#text"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            },
            _ => Self::Accepted,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    pub session: Option<Session>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub name: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    pub toptracks: Option<TopTracks>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracks {
    pub track: Option<OneOrMany<TopTrack>>,
}

/// Last.fm collapses single-item lists into a bare object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTrack {
    pub name: String,
}

#[derive(Tabled)]
pub struct TopTrackRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub name: String,
}
