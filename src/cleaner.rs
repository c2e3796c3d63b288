//! Cleaning pipeline: find a playlist, drop or replace its explicit tracks and
//! write the result into a new playlist.

use log::{debug, error, info, warn};

use crate::clients::{
    Catalog, SpotifyClient,
    entities::{PlaylistSummary, Track, User},
    errors::{Error, Result},
};

/// Largest number of items the service returns or accepts in one request
pub const MAX_PAGE_SIZE: u32 = 100;

/// Appended to the source playlist name to name the clean copy
pub const DEFAULT_SUFFIX: &str = " (Clean)";

/// First playlist whose name matches `name` exactly (case-sensitive)
pub fn find_playlist_by_name<'a>(
    playlists: &'a [PlaylistSummary],
    name: &str,
) -> Option<&'a PlaylistSummary> {
    playlists.iter().find(|p| p.name == name)
}

/// Split tracks into `(clean, explicit)`, keeping the relative order of each side
pub fn split_tracks(tracks: Vec<Track>) -> (Vec<Track>, Vec<Track>) {
    let (explicit, clean): (Vec<Track>, Vec<Track>) =
        tracks.into_iter().partition(Track::is_explicit);
    (clean, explicit)
}

/// Offsets for listing `total` items `page_size` at a time.
///
/// Always yields at least one offset, so an empty playlist still costs one request.
pub fn page_offsets(total: u32, page_size: u32) -> Vec<u32> {
    let pages = total.div_ceil(page_size).max(1);
    (0..pages).map(|page| page * page_size).collect()
}

/// Search query used to look up a clean version of `track`
pub fn replacement_query(track: &Track) -> String {
    format!("track:{} artist:{}", track.name(), track.primary_artist())
}

/// First non-explicit result of a catalog search for the track's name and primary artist.
///
/// Results are taken in the order the service ranks them and only the first page is
/// looked at. The candidate's name and artist are not compared against the explicit track's.
pub async fn find_clean_replacement<C: Catalog + ?Sized>(
    catalog: &C,
    explicit_track: &Track,
) -> Result<Option<Track>> {
    let results = catalog
        .search_tracks(&replacement_query(explicit_track))
        .await?;
    Ok(results.into_iter().find(|t| !t.is_explicit()))
}

/// Fetch every track of a playlist one page at a time, in playlist order
pub async fn fetch_playlist_tracks<C: Catalog + ?Sized>(
    catalog: &C,
    playlist: &PlaylistSummary,
    page_size: u32,
) -> Result<Vec<Track>> {
    let mut tracks = Vec::with_capacity(playlist.total_tracks as usize);
    for offset in page_offsets(playlist.total_tracks, page_size) {
        let page = catalog
            .playlist_tracks(&playlist.id, page_size, offset)
            .await?;
        tracks.extend(page);
    }
    Ok(tracks)
}

/// Add tracks to a playlist in batches of `page_size`, in order.
///
/// Batches are independent writes: a failure leaves earlier batches in place.
pub async fn add_tracks_in_batches<C: Catalog + ?Sized>(
    catalog: &C,
    playlist_id: &str,
    track_ids: &[String],
    page_size: u32,
) -> Result<()> {
    for batch in track_ids.chunks(page_size as usize) {
        catalog.add_tracks(playlist_id, batch).await?;
    }
    Ok(())
}

/// Configuration for a cleaning run
pub struct Config {
    pub catalog: Box<dyn Catalog>,
    pub suffix: String,
    pub public: bool,
    pub page_size: u32,
}

/// Builds a `Config`, falling back to the Spotify client from the environment
#[derive(Default)]
pub struct ConfigBuilder {
    catalog: Option<Box<dyn Catalog>>,
    suffix: Option<String>,
    public: Option<bool>,
    page_size: Option<u32>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn catalog(mut self, catalog: Box<dyn Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    #[must_use]
    pub fn public(mut self, public: bool) -> Self {
        self.public = Some(public);
        self
    }

    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn build(self) -> Result<Config> {
        let catalog = match self.catalog {
            Some(c) => c,
            None => Box::new(SpotifyClient::try_default()?),
        };
        let page_size = self.page_size.unwrap_or(MAX_PAGE_SIZE);
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(Error::ConfigurationError(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }
        Ok(Config {
            catalog,
            suffix: self.suffix.unwrap_or_else(|| DEFAULT_SUFFIX.to_string()),
            public: self.public.unwrap_or(true),
            page_size,
        })
    }
}

/// What a finished run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanSummary {
    pub playlist_id: String,
    pub playlist_name: String,
    /// Clean tracks carried over from the source playlist
    pub kept: usize,
    /// Replacements found for explicit tracks, in the order they were found
    pub added: Vec<Track>,
    /// Explicit tracks left out because no clean version was found
    pub skipped: Vec<Track>,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    PlaylistNotFound(String),
    NoExplicitTracks,
    Cleaned(CleanSummary),
}

impl Outcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::PlaylistNotFound(_) => 1,
            Outcome::NoExplicitTracks | Outcome::Cleaned(_) => 0,
        }
    }
}

/// Runs the cleaning steps strictly one after another
pub struct Cleaner {
    config: Config,
}

impl Cleaner {
    pub fn new(config: Config) -> Self {
        Cleaner { config }
    }

    /// Authorize against the service and resolve the account. May prompt on the terminal.
    pub async fn login(&self) -> Result<User> {
        let catalog = self.config.catalog.as_ref();

        info!("Authorizing client ...");
        catalog.authorize().await?;
        let user = catalog.current_user().await?;
        debug!("{user:?}");
        Ok(user)
    }

    /// Clean the playlist named `playlist_name` owned by `user`
    pub async fn clean(&self, user: &User, playlist_name: &str) -> Result<Outcome> {
        let catalog = self.config.catalog.as_ref();

        info!("Getting playlists");
        let playlists = catalog.user_playlists(user).await?;
        let Some(target) = find_playlist_by_name(&playlists, playlist_name) else {
            error!("Playlist of name {playlist_name} not found, exiting");
            return Ok(Outcome::PlaylistNotFound(playlist_name.to_string()));
        };
        info!("Playlist Found");

        info!("Getting tracks in playlist");
        let tracks = fetch_playlist_tracks(catalog, target, self.config.page_size).await?;
        let (mut clean_tracks, explicit_tracks) = split_tracks(tracks);
        if explicit_tracks.is_empty() {
            info!("Playlist contains no explicit songs!");
            return Ok(Outcome::NoExplicitTracks);
        }
        let kept = clean_tracks.len();
        debug!(
            "{kept} clean and {} explicit tracks in {playlist_name}",
            explicit_tracks.len()
        );

        let mut added = Vec::new();
        let mut skipped = Vec::new();
        for explicit_track in explicit_tracks {
            info!(
                "Finding clean version of {} by {}",
                explicit_track.name(),
                explicit_track.primary_artist()
            );
            match find_clean_replacement(catalog, &explicit_track).await? {
                Some(clean_track) => {
                    info!("Clean track found");
                    clean_tracks.push(clean_track.clone());
                    added.push(clean_track);
                }
                None => {
                    warn!("No clean track found");
                    skipped.push(explicit_track);
                }
            }
        }

        info!("Making a new playlist");
        let new_playlist_name = format!("{playlist_name}{}", self.config.suffix);
        let new_playlist_id = catalog
            .create_playlist(user, &new_playlist_name, self.config.public)
            .await?;

        info!("Adding clean tracks to the new playlist");
        let track_ids: Vec<String> = clean_tracks.into_iter().map(Track::into_id).collect();
        add_tracks_in_batches(
            catalog,
            &new_playlist_id,
            &track_ids,
            self.config.page_size,
        )
        .await?;

        info!("New playlist ready! Have a look at {new_playlist_name}");
        info!("The following tracks were added");
        for track in &added {
            info!("{} by {}", track.name(), track.primary_artist());
        }

        Ok(Outcome::Cleaned(CleanSummary {
            playlist_id: new_playlist_id,
            playlist_name: new_playlist_name,
            kept,
            added,
            skipped,
        }))
    }
}
