//! # CLI Module
//!
//! This module provides the command-line interface layer for scrobblecli. It
//! implements the user-facing commands and wires the console (prompts,
//! progress output) to the Last.fm client in [`crate::lastfm`].
//!
//! ## Command Categories
//!
//! - [`auth`] - Runs the Last.fm authorization handshake and stores the session key
//! - [`scrobble`] - Submits a batch of scrobbles for one artist
//! - [`top_tracks`] - Lists an artist's top tracks
//!
//! ## Track Selection
//!
//! `scrobble` works in one of two modes:
//!
//! - **Explicit**: the same track (and optional album) for every scrobble
//! - **Random**: each scrobble picks a random track from the artist's top tracks
//!
//! ## Error Handling
//!
//! Commands return [`crate::Res`]. Configuration and handshake errors abort
//! the command; the binary prints them and exits with status 1. A failed
//! scrobble inside a batch is reported on its own line and the batch keeps
//! going.
//!
//! ## Usage Patterns
//!
//! ```bash
//! scrobblecli auth                                  # Authorize once
//! scrobblecli scrobble --artist Bjork --track Joga --count 5
//! scrobblecli scrobble --artist Bjork --random --count 20
//! scrobblecli top-tracks Bjork --limit 10
//! ```

mod authorize;
mod scrobble;
mod tracks;

pub use authorize::auth;
pub use authorize::confirm_authorization;
pub use scrobble::ScrobbleRequest;
pub use scrobble::scrobble;
pub use tracks::top_tracks;
