use crate::{
    Res,
    config::Config,
    info,
    lastfm::{HttpTransport, auth as lastfm_auth},
    management::SessionManager,
    success, utils, warning,
};

/// Runs the authorization handshake and stores the session key.
///
/// Without `force` an existing session file is left alone.
pub async fn auth(config: &Config, force: bool) -> Res<()> {
    let sessions = SessionManager::new(&config.session_file);
    if !force && sessions.load().await?.is_some() {
        info!(
            "Already authorized. Session key stored in {}. Use --force to authorize again.",
            sessions.path().display()
        );
        return Ok(());
    }

    let transport = HttpTransport::new(&config.api_url)?;
    lastfm_auth::handshake(&transport, config, &sessions, confirm_authorization).await?;
    success!("Session key saved to {}", sessions.path().display());
    Ok(())
}

/// Shows the authorization URL and waits for the user to confirm on the console.
pub fn confirm_authorization(url: &str) -> Res<()> {
    info!("Please authorize this app by visiting:\n{}\n", url);
    if webbrowser::open(url).is_err() {
        warning!("Failed to open browser. Please navigate to the URL above manually.");
    }

    utils::prompt("Press ENTER after you have authorized... ")?;
    Ok(())
}
