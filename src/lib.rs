//! Last.fm Scrobbler CLI Library
//!
//! This library provides the pieces behind the `scrobblecli` binary: request
//! signing for the Last.fm web API, the desktop authorization handshake that
//! yields a session key, scrobble submission, and artist top-track lookup.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Credentials and endpoint configuration loaded from the environment
//! - `error` - Error taxonomy shared by every module
//! - `lastfm` - Last.fm web API client implementation
//! - `management` - Local session key persistence
//! - `types` - Data structures and type definitions
//! - `utils` - Console prompts, timestamps and progress helpers
//!
//! # Example
//!
//! ```
//! use scrobblecli::{config, lastfm};
//!
//! #[tokio::main]
//! async fn main() -> scrobblecli::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     let transport = lastfm::HttpTransport::new(&config.api_url)?;
//!     let tracks = lastfm::tracks::top_tracks(&transport, &config, "Portishead", 20).await;
//!     println!("{:?}", tracks);
//!     Ok(())
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

pub mod cli;
pub mod config;
pub mod error;
pub mod lastfm;
pub mod management;
pub mod types;
pub mod utils;

pub use error::Error;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in the crate reports one of the [`Error`]
/// variants, so callers can tell configuration problems apart from protocol,
/// authorization and transport failures.
///
/// # Example
///
/// ```
/// use scrobblecli::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Error>;

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Enables or disables output of the [`debug!`] macro.
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

/// Returns whether [`debug!`] output is enabled.
pub fn verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Starting authorization...");
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Session key saved to {}", path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Only the binary uses it, for
/// errors that end the run.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, such as a top-tracks lookup that came back
/// empty or a single scrobble that failed inside a batch.
///
/// # Example
///
/// ```
/// warning!("Last.fm API error ({}): {}", code, message);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a dimmed diagnostic line when verbose output is enabled.
///
/// Request-level detail goes through this macro. Never pass the API secret
/// or the session key to it.
///
/// # Example
///
/// ```
/// debug!("GET {}", method);
/// ```
#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => ({
    if $crate::verbose() {
      use colored::Colorize;
      eprintln!("[{}] {}", "·".dimmed(), std::format_args!($($arg)*));
    }
  })
}
