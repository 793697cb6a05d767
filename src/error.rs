use thiserror::Error;

/// Errors raised while talking to Last.fm or handling local state.
///
/// Handshake failures (`Configuration`, `Protocol`, `Authorization`) end the
/// run. Per-scrobble failures are collected by the batch loop instead of
/// being propagated.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or empty credential, or an unusable configured URL.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A call that should always succeed returned an unexpected shape.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The session exchange was rejected. Carries the raw response body.
    #[error("Authorization failed: {0}")]
    Authorization(String),

    /// Network level failure: connection refused, timeout, undecodable body.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid value entered on the console or passed as a flag.
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Protocol(err.to_string())
    }
}
