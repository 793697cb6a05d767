//! # Last.fm Integration Module
//!
//! This module provides the interface to the Last.fm web API used by the
//! scrobbler: request signing, the desktop authorization handshake, scrobble
//! submission and artist top-track lookup. Every call goes to a single
//! endpoint and is dispatched by its `method` parameter.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! Last.fm Integration Layer
//!     ├── Signature (api_sig computation)
//!     ├── Authentication (auth.getToken / auth.getSession)
//!     ├── Scrobbling (track.scrobble)
//!     └── Tracks (artist.getTopTracks)
//!          ↓
//! Transport (reqwest, JSON)
//!          ↓
//! Last.fm Web API
//! ```
//!
//! ## Request Signing
//!
//! [`signature`] - Every authenticated call carries an `api_sig` parameter: the
//! MD5 digest of the sorted `key value` pairs followed by the API secret. The
//! `format` and `callback` parameters are excluded from the digest.
//!
//! ## Authentication Strategy
//!
//! [`auth`] - Implements the desktop application flow:
//! 1. **Token Request**: `auth.getToken` returns a short-lived token
//! 2. **User Authorization**: the user approves the token on last.fm
//! 3. **Session Exchange**: signed `auth.getSession` trades the token for a session key
//! 4. **Persistence**: the session key is stored in a local text file
//!
//! Session keys do not expire. Renewal means deleting the file and
//! authorizing again.
//!
//! ## Scrobbling
//!
//! [`scrobble`] - Submits signed `track.scrobble` POST requests one at a time.
//! A batch keeps going when a single submission fails.
//!
//! ## Track Lookup
//!
//! [`tracks`] - Fetches an artist's top tracks. Lookup problems are reported
//! as warnings and yield an empty list.
//!
//! ## Error Types
//!
//! All fallible functions return [`crate::Res`]; see [`crate::Error`] for the
//! variants.
//!
//! ## Transport
//!
//! [`transport`] - The [`Transport`] trait decouples the API logic from HTTP.
//! [`HttpTransport`] sends GET parameters as a query string and POST
//! parameters as a form body. The body is decoded regardless of the HTTP
//! status, since Last.fm reports API errors as JSON with 4xx statuses.

pub mod auth;
pub mod scrobble;
pub mod signature;
pub mod tracks;
pub mod transport;

pub use transport::{HttpTransport, Params, Transport};
