//! Configuration management for the Last.fm scrobbler.
//!
//! This module loads `.env` files into the process environment and turns the
//! environment into an explicit [`Config`] value that is handed to every
//! operation. Nothing reads credentials from globals after startup.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (endpoints and session file only)

use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{Error, Res};

/// API key environment variable.
pub const ENV_API_KEY: &str = "API_KEY";
/// API secret environment variable.
pub const ENV_API_SECRET: &str = "API_SECRET";
/// Optional override of the web service endpoint.
pub const ENV_API_URL: &str = "LASTFM_API_URL";
/// Optional override of the user authorization page.
pub const ENV_AUTH_URL: &str = "LASTFM_AUTH_URL";
/// Optional override of the session key file location.
pub const ENV_SESSION_FILE: &str = "LASTFM_SESSION_FILE";

pub const DEFAULT_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";
pub const DEFAULT_AUTH_URL: &str = "https://www.last.fm/api/auth/";
pub const DEFAULT_SESSION_FILE: &str = "lastfm_session.txt";

/// Credentials and endpoints for one run.
///
/// The API key is sent with every request. The API secret is only ever fed
/// into request signatures and never transmitted.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_secret: String,
    pub api_url: String,
    pub auth_url: String,
    pub session_file: PathBuf,
}

impl Config {
    /// Creates a configuration with default endpoints and session file.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            api_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
        }
    }

    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `API_KEY` or `API_SECRET` is
    /// unset or empty.
    ///
    /// # Example
    ///
    /// ```
    /// config::load_env().await?;
    /// let config = Config::from_env()?;
    /// ```
    pub fn from_env() -> Res<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Values are trimmed. Empty optional values fall back to the defaults,
    /// empty credentials are rejected.
    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = read(ENV_API_KEY)
            .ok_or_else(|| Error::Configuration(format!("{ENV_API_KEY} must be set")))?;
        let api_secret = read(ENV_API_SECRET)
            .ok_or_else(|| Error::Configuration(format!("{ENV_API_SECRET} must be set")))?;

        let mut config = Self::new(api_key, api_secret);
        if let Some(api_url) = read(ENV_API_URL) {
            config.api_url = api_url;
        }
        if let Some(auth_url) = read(ENV_AUTH_URL) {
            config.auth_url = auth_url;
        }
        if let Some(session_file) = read(ENV_SESSION_FILE) {
            config.session_file = PathBuf::from(session_file);
        }

        Ok(config)
    }
}

/// Loads environment variables from a `.env` file.
///
/// A `.env` in the current directory wins. Otherwise the file under the
/// platform-specific local data directory is used when it exists:
/// - Linux: `~/.local/share/scrobblecli/.env`
/// - macOS: `~/Library/Application Support/scrobblecli/.env`
/// - Windows: `%LOCALAPPDATA%/scrobblecli/.env`
///
/// Variables already present in the environment are not overwritten. Having
/// no `.env` at all is fine; [`Config::from_env`] reports what is missing.
///
/// # Returns
///
/// The path of the loaded file, or `None` if no file was found.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if a `.env` file exists but cannot be
/// parsed, and [`Error::Io`] if the data directory cannot be created.
pub async fn load_env() -> Res<Option<PathBuf>> {
    let local = PathBuf::from(".env");
    if local.is_file() {
        return load_env_file(&local).map(Some);
    }

    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }
    if path.is_file() {
        return load_env_file(&path).map(Some);
    }

    Ok(None)
}

fn load_env_file(path: &Path) -> Res<PathBuf> {
    dotenv::from_path(path).map_err(|e| {
        Error::Configuration(format!("cannot load {}: {}", path.display(), e))
    })?;
    Ok(path.to_path_buf())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("scrobblecli/.env");
    path
}
