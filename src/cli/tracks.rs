use tabled::Table;

use crate::{
    Res,
    config::Config,
    lastfm::{HttpTransport, tracks},
    types::TopTrackRow,
    utils, warning,
};

pub async fn top_tracks(config: &Config, artist: &str, limit: u32) -> Res<()> {
    let transport = HttpTransport::new(&config.api_url)?;

    let pb = utils::spinner(&format!("Fetching top tracks for {artist}..."));
    let names = tracks::top_tracks(&transport, config, artist, limit).await;
    pb.finish_and_clear();

    if names.is_empty() {
        warning!("Could not find top tracks for that artist.");
        return Ok(());
    }

    let rows: Vec<TopTrackRow> = names
        .into_iter()
        .enumerate()
        .map(|(i, name)| TopTrackRow { rank: i + 1, name })
        .collect();
    println!("{}", Table::new(rows));
    Ok(())
}
