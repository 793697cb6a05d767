use std::fmt;

use reqwest::Url;
use serde_json::Value;

use crate::{
    Error, Res,
    config::Config,
    debug,
    lastfm::{Params, Transport, signature},
    management::SessionManager,
    types::{SessionResponse, TokenResponse},
};

/// Steps of the desktop authorization handshake.
///
/// There is no failure state: an error at any step is returned to the
/// caller and the handshake is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeState {
    NoSession,
    TokenRequested,
    AwaitingUserAuthorization,
    SessionGranted,
    Persisted,
}

impl fmt::Display for HandshakeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoSession => "no session",
            Self::TokenRequested => "token requested",
            Self::AwaitingUserAuthorization => "awaiting user authorization",
            Self::SessionGranted => "session granted",
            Self::Persisted => "persisted",
        };
        f.write_str(name)
    }
}

/// Where the session key returned by [`ensure_session`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    /// Read from the session file.
    Cached,
    /// Obtained by a handshake during this call and persisted.
    Authorized,
}

/// Returns the session key, running the handshake only when needed.
///
/// If the session file exists and holds a non-empty key, that key is returned
/// trimmed and no request is made. The key is not validated remotely; a
/// revoked key shows up later as rejected scrobbles.
///
/// # Arguments
///
/// * `transport` - Transport used for the handshake requests
/// * `config` - Credentials and endpoints
/// * `sessions` - Location of the session key file
/// * `authorize` - Called with the authorization URL; must return once the
///   user has approved the token on last.fm
///
/// # Errors
///
/// Propagates every error from [`handshake`].
pub async fn ensure_session<T, F>(
    transport: &T,
    config: &Config,
    sessions: &SessionManager,
    authorize: F,
) -> Res<(String, SessionOrigin)>
where
    T: Transport + ?Sized,
    F: FnOnce(&str) -> Res<()>,
{
    if let Some(key) = sessions.load().await? {
        debug!("using session key from {}", sessions.path().display());
        return Ok((key, SessionOrigin::Cached));
    }

    let key = handshake(transport, config, sessions, authorize).await?;
    Ok((key, SessionOrigin::Authorized))
}

/// Runs the full handshake and persists the resulting session key.
///
/// # Authentication Flow
///
/// 1. **Token Request**: unsigned `auth.getToken`
/// 2. **User Authorization**: `authorize` receives the URL built by
///    [`authorization_url`] and blocks until the user confirms
/// 3. **Session Exchange**: signed `auth.getSession`
/// 4. **Persistence**: the key overwrites the session file
///
/// # Errors
///
/// - [`Error::Protocol`] - the token response has no `token`
/// - [`Error::Authorization`] - the exchange response has no `session`;
///   nothing is written in that case
/// - [`Error::Transport`] / [`Error::Io`] - network or file failures
pub async fn handshake<T, F>(
    transport: &T,
    config: &Config,
    sessions: &SessionManager,
    authorize: F,
) -> Res<String>
where
    T: Transport + ?Sized,
    F: FnOnce(&str) -> Res<()>,
{
    let mut state = HandshakeState::NoSession;
    debug!("handshake: {}", state);

    let token = request_token(transport, config).await?;
    state = HandshakeState::TokenRequested;
    debug!("handshake: {}", state);

    let url = authorization_url(config, &token)?;
    state = HandshakeState::AwaitingUserAuthorization;
    debug!("handshake: {}", state);
    authorize(&url)?;

    let session_key = request_session(transport, config, &token).await?;
    state = HandshakeState::SessionGranted;
    debug!("handshake: {}", state);

    sessions.persist(&session_key).await?;
    state = HandshakeState::Persisted;
    debug!("handshake: {}", state);

    Ok(session_key)
}

/// Requests a fresh authorization token with `auth.getToken`.
///
/// # Errors
///
/// Returns [`Error::Protocol`] if the response carries no `token` field.
pub async fn request_token<T: Transport + ?Sized>(transport: &T, config: &Config) -> Res<String> {
    let params = Params::from([
        ("method".to_string(), "auth.getToken".to_string()),
        ("api_key".to_string(), config.api_key.clone()),
        ("format".to_string(), "json".to_string()),
    ]);

    let body = transport.get(&params).await?;
    let response: TokenResponse = serde_json::from_value(body.clone())?;
    response
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Protocol(format!("auth.getToken returned no token: {body}")))
}

/// Builds the page the user has to visit to approve `token`.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the configured authorization URL does
/// not parse.
pub fn authorization_url(config: &Config, token: &str) -> Res<String> {
    let url = Url::parse_with_params(
        &config.auth_url,
        &[("api_key", config.api_key.as_str()), ("token", token)],
    )
    .map_err(|e| Error::Configuration(format!("invalid auth url {}: {}", config.auth_url, e)))?;
    Ok(url.to_string())
}

/// Exchanges an approved token for a session key with `auth.getSession`.
///
/// # Errors
///
/// - [`Error::Authorization`] - no `session` in the response, which means the
///   token was not approved or has expired. The message holds the raw body.
/// - [`Error::Protocol`] - a `session` without a `key`
pub async fn request_session<T: Transport + ?Sized>(
    transport: &T,
    config: &Config,
    token: &str,
) -> Res<String> {
    let mut params = Params::from([
        ("method".to_string(), "auth.getSession".to_string()),
        ("api_key".to_string(), config.api_key.clone()),
        ("token".to_string(), token.to_string()),
        ("format".to_string(), "json".to_string()),
    ]);
    signature::sign_into(&mut params, &config.api_secret);

    let body = transport.get(&params).await?;
    let session = match body.get("session") {
        Some(Value::Null) | None => None,
        Some(_) => serde_json::from_value::<SessionResponse>(body.clone())?.session,
    };
    let Some(session) = session else {
        return Err(Error::Authorization(format!(
            "failed to get session. Response: {body}"
        )));
    };

    if let Some(name) = &session.name {
        debug!("session granted for user {}", name);
    }
    session
        .key
        .filter(|k| !k.is_empty())
        .ok_or_else(|| Error::Protocol(format!("auth.getSession returned no key: {body}")))
}
