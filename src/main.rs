use std::time::Duration;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use scrobblecli::{
    cli, config, debug, error,
    lastfm::{scrobble::DEFAULT_DELAY, tracks::MAX_LIMIT},
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Print request-level diagnostics
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with the Last.fm API and store the session key
    Auth(AuthOptions),

    /// Submit scrobbles for an artist
    Scrobble(ScrobbleOptions),

    /// List the top tracks of an artist
    TopTracks(TopTracksOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Authorize again even if a session key is stored
    #[clap(long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ScrobbleOptions {
    /// Artist name (asked for when omitted)
    #[clap(long)]
    pub artist: Option<String>,

    /// Track name (asked for when omitted, unless --random)
    #[clap(long, conflicts_with = "random")]
    pub track: Option<String>,

    /// Album name
    #[clap(long, conflicts_with = "random")]
    pub album: Option<String>,

    /// Number of scrobbles (asked for when omitted)
    #[clap(long, short, value_parser = parse_count)]
    pub count: Option<usize>,

    /// Pick a random top track of the artist for every scrobble
    #[clap(long)]
    pub random: bool,

    /// Number of top tracks to choose from with --random
    #[clap(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..=MAX_LIMIT as i64))]
    pub limit: u32,

    /// Pause between scrobbles in milliseconds
    #[clap(long, default_value_t = DEFAULT_DELAY.as_millis() as u64)]
    pub delay_ms: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct TopTracksOptions {
    /// Artist name
    pub artist: String,

    /// Number of tracks to fetch
    #[clap(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..=MAX_LIMIT as i64))]
    pub limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn parse_count(value: &str) -> Result<usize, String> {
    scrobblecli::utils::parse_count(value).map_err(|e| e.to_string())
}

async fn load_config() -> config::Config {
    match config::load_env().await {
        Ok(Some(path)) => debug!("loaded environment from {}", path.display()),
        Ok(None) => debug!("no .env file found"),
        Err(e) => error!("Cannot load environment. Err: {}", e),
    }

    match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    scrobblecli::set_verbose(cli.verbose);

    let result = match cli.command {
        Command::Auth(opt) => cli::auth(&load_config().await, opt.force).await,
        Command::Scrobble(opt) => {
            let request = cli::ScrobbleRequest {
                artist: opt.artist,
                track: opt.track,
                album: opt.album,
                count: opt.count,
                random: opt.random,
                limit: opt.limit,
                delay: Duration::from_millis(opt.delay_ms),
            };
            cli::scrobble(&load_config().await, request).await
        }
        Command::TopTracks(opt) => {
            cli::top_tracks(&load_config().await, &opt.artist, opt.limit).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{}", e);
    }
}
