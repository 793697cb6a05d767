use std::time::Duration;

use colored::Colorize;

use crate::{
    Res,
    cli::confirm_authorization,
    config::Config,
    info,
    lastfm::{
        HttpTransport,
        auth::{self, SessionOrigin},
        scrobble::{self, BatchOptions},
        tracks,
    },
    management::SessionManager,
    success,
    types::{BatchEntry, ScrobbleOutcome, TrackSelection},
    utils, warning,
};

/// Values given on the command line. Missing ones are asked for on the console.
#[derive(Debug, Clone, Default)]
pub struct ScrobbleRequest {
    pub artist: Option<String>,
    pub track: Option<String>,
    pub album: Option<String>,
    pub count: Option<usize>,
    /// Pick each track at random from the artist's top tracks.
    pub random: bool,
    /// How many top tracks to sample from in random mode.
    pub limit: u32,
    pub delay: Duration,
}

pub async fn scrobble(config: &Config, request: ScrobbleRequest) -> Res<()> {
    let transport = HttpTransport::new(&config.api_url)?;
    let sessions = SessionManager::new(&config.session_file);

    let (session_key, origin) =
        auth::ensure_session(&transport, config, &sessions, confirm_authorization).await?;
    match origin {
        SessionOrigin::Cached => info!("Loaded saved session key."),
        SessionOrigin::Authorized => {
            success!("Session key saved to {}", sessions.path().display())
        }
    }

    let artist = match request.artist {
        Some(artist) => artist,
        None => utils::prompt("Artist: ")?,
    };
    let count = match request.count {
        Some(count) => count,
        None => utils::parse_count(&utils::prompt("How many scrobbles? ")?)?,
    };

    let selection = if request.random {
        let pb = utils::spinner(&format!("Fetching top tracks for {artist}..."));
        let top = tracks::top_tracks(&transport, config, &artist, request.limit).await;
        pb.finish_and_clear();

        if top.is_empty() {
            warning!("Could not find top tracks for that artist.");
            return Ok(());
        }
        info!(
            "Found {} tracks for {}. Scrobbling {} times...",
            top.len(),
            artist,
            count
        );
        TrackSelection::sampled(top)
    } else {
        let track = match request.track {
            Some(track) => track,
            None => utils::prompt("Track: ")?,
        };
        let album = match request.album {
            Some(album) => utils::non_empty(album),
            None => utils::non_empty(utils::prompt("Album (optional): ")?),
        };
        info!("Scrobbling '{}' by {} {} times...", track, artist, count);
        TrackSelection::explicit(track, album)
    };

    let options = BatchOptions::new(count).with_delay(request.delay);
    let pb = utils::progress_bar(count);
    let mut accepted = 0;
    let summary = scrobble::submit_batch(
        &transport,
        config,
        &session_key,
        &artist,
        &selection,
        &options,
        &mut rand::rng(),
        |entry| {
            let is_accepted = entry
                .result
                .as_ref()
                .is_ok_and(|body| ScrobbleOutcome::from_response(body) == ScrobbleOutcome::Accepted);
            if is_accepted {
                accepted += 1;
            }
            pb.inc(1);
            pb.println(report_line(entry));
        },
    )
    .await?;
    pb.finish_and_clear();

    if summary.failed > 0 {
        warning!("{} scrobbles failed to send", summary.failed);
    }
    if accepted == count {
        success!("{}/{} scrobbles accepted", accepted, count);
    } else {
        warning!("{}/{} scrobbles accepted", accepted, count);
    }
    Ok(())
}

fn report_line(entry: &BatchEntry) -> String {
    let position = format!("{}/{}", entry.index + 1, entry.total);
    let what = format!("{} - {}", entry.scrobble.artist, entry.scrobble.track);
    match &entry.result {
        Ok(body) => match ScrobbleOutcome::from_response(body) {
            ScrobbleOutcome::Accepted => format!("[{}] {position}: {what}", "✓".green().bold()),
            ScrobbleOutcome::Ignored { message } => {
                format!("[{}] {position}: {what} ignored: {message}", "!".yellow().bold())
            }
            ScrobbleOutcome::Rejected { code, message } => format!(
                "[{}] {position}: {what} rejected ({code}): {message}",
                "!".red().bold()
            ),
        },
        Err(e) => format!("[{}] {position}: {what} failed: {e}", "!".red().bold()),
    }
}
