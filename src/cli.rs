use clap::Parser;
use log::{debug, info};
use rcleaner::cleaner::{self, Outcome};
use rcleaner::clients::errors::{Error, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Parser)]
#[command(name = "rcleaner")]
#[command(version, about = "Make a clean copy of a Spotify playlist", long_about = None)]
struct Cli {
    /// Name of the playlist to clean. Asked for on stdin when omitted.
    playlist: Option<String>,

    /// Create the clean playlist as private
    #[arg(long)]
    private: bool,

    /// Appended to the playlist name to name the clean copy
    #[arg(long, default_value = cleaner::DEFAULT_SUFFIX, allow_hyphen_values = true)]
    suffix: String,
}

pub async fn run() -> Result<Outcome> {
    let cli = Cli::parse();

    debug!("Loading .env");
    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env loaded: {e}");
    }

    info!("Building config ...");
    let config = cleaner::ConfigBuilder::new()
        .suffix(cli.suffix)
        .public(!cli.private)
        .build()?;

    // The OAuth prompt may be shown on the first run, before asking for the playlist
    let cleaner = cleaner::Cleaner::new(config);
    let user = cleaner.login().await?;

    let playlist_name = match cli.playlist {
        Some(name) => name,
        None => prompt_playlist_name().await?,
    };

    cleaner.clean(&user, &playlist_name).await
}

async fn prompt_playlist_name() -> Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(b"Enter name of playlist to clean: ")
        .await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;

    let name = line.trim_end_matches(['\r', '\n']);
    if name.is_empty() {
        return Err(Error::ConfigurationError(
            "No playlist name given".to_string(),
        ));
    }
    Ok(name.to_string())
}
