use std::{
    io::{self, BufRead, Write},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Error, Res};

/// Seconds between two consecutive scrobbles of a batch.
pub const SCROBBLE_SPACING: i64 = 60;

/// Timestamp of scrobble `index` in a batch of `count` ending one minute before `now`.
///
/// The value is `now - (count - index) * 60`: strictly increasing with
/// `index` and strictly below `now`.
///
/// # Errors
///
/// Returns [`Error::Input`] if `index` is not below `count` or the result
/// does not fit in an `i64`.
pub fn batch_timestamp(now: i64, count: usize, index: usize) -> Res<i64> {
    let too_large = || Error::Input(format!("a batch of {count} scrobbles is too large"));
    if index >= count {
        return Err(Error::Input(format!("scrobble {index} is outside a batch of {count}")));
    }
    let remaining = i64::try_from(count - index).map_err(|_| too_large())?;
    remaining
        .checked_mul(SCROBBLE_SPACING)
        .and_then(|offset| now.checked_sub(offset))
        .ok_or_else(too_large)
}

/// Prints `label` and reads one trimmed line from stdin.
pub fn prompt(label: &str) -> Res<String> {
    let stdin = io::stdin();
    prompt_from(&mut stdin.lock(), label)
}

/// Like [`prompt`], reading from any buffered source.
pub fn prompt_from<R: BufRead>(input: &mut R, label: &str) -> Res<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::Input(format!("no input for '{}'", label.trim())));
    }
    Ok(line.trim().to_string())
}

/// Parses a scrobble count. Zero and non-numeric values are rejected.
pub fn parse_count(value: &str) -> Res<usize> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(Error::Input("count must be greater than 0".to_string())),
        Ok(count) => Ok(count),
        Err(_) => Err(Error::Input(format!("'{}' is not a number", value.trim()))),
    }
}

/// Empty strings become `None`.
pub fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

pub fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:30.blue} {pos}/{len} {msg}") {
        pb.set_style(style);
    }
    pb
}
