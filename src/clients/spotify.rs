use std::path::PathBuf;

use log::debug;

use crate::clients::{
    catalog::Catalog,
    entities::{PlaylistSummary, Track, User},
    errors::{Error, Result},
};
use futures::stream::TryStreamExt;
use rspotify::{
    AuthCodeSpotify, Config, Credentials, OAuth,
    model::{
        FullTrack, PlayableId, PlayableItem, PlaylistId, PlaylistItem, PrivateUser, SearchResult,
        SearchType, SimplifiedPlaylist, TrackId, UserId,
    },
    prelude::*,
    scopes,
};

impl TryFrom<FullTrack> for Track {
    type Error = Error;

    fn try_from(f: FullTrack) -> Result<Track> {
        Track::try_new(
            f.id.map(|id| id.id().to_owned()),
            f.name,
            f.artists.into_iter().map(|a| a.name).collect(),
            f.explicit,
        )
    }
}

impl TryFrom<PlaylistItem> for Track {
    type Error = Error;

    fn try_from(item: PlaylistItem) -> Result<Track> {
        match item.track {
            Some(PlayableItem::Track(track)) => Track::try_from(track),
            Some(_) => Err(Error::ParseError(
                "playlist item is not a track".to_string(),
            )),
            None => Err(Error::ParseError(
                "playlist item is no longer available".to_string(),
            )),
        }
    }
}

impl From<SimplifiedPlaylist> for PlaylistSummary {
    fn from(p: SimplifiedPlaylist) -> PlaylistSummary {
        PlaylistSummary {
            id: p.id.id().to_owned(),
            name: p.name,
            total_tracks: p.tracks.total,
        }
    }
}

impl From<PrivateUser> for User {
    fn from(u: PrivateUser) -> User {
        User {
            id: u.id.id().to_owned(),
            display_name: u.display_name,
        }
    }
}

fn tracks_from_search(query: &str, result: SearchResult) -> Result<Vec<Track>> {
    match result {
        SearchResult::Tracks(page) => page.items.into_iter().map(Track::try_from).collect(),
        other => Err(Error::ParseError(format!(
            "expected track results for '{query}', got {other:?}"
        ))),
    }
}

/// `Catalog` backed by the Spotify Web API
pub struct SpotifyClient {
    pub spotify: AuthCodeSpotify,
}

impl SpotifyClient {
    pub fn new(spotify: AuthCodeSpotify) -> Self {
        SpotifyClient { spotify }
    }

    // Create a SpotifyClient from environment variables or raise a configuration error
    pub fn try_default() -> Result<Self> {
        let creds = Credentials::from_env()
        .ok_or_else(|| Error::ConfigurationError("Missing Spotify credentials in environment variables. Set RSPOTIFY_CLIENT_ID and RSPOTIFY_CLIENT_SECRET.".into()))?;
        let oauth = OAuth::from_env(scopes!(
            "playlist-read-private",
            "playlist-modify-private",
            "playlist-modify-public"
        ))
        .ok_or_else(|| Error::ConfigurationError("Missing Spotify OAuth configuration in environment variables. Set RSPOTIFY_REDIRECT_URI.".into()))?;

        // Token is cached between runs so the browser prompt only shows up once
        let cache_path = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp")) // Fallback to /tmp if cache directory can't be determined
            .join(".rcleaner_cache");

        let spotify = AuthCodeSpotify::with_config(
            creds,
            oauth,
            Config {
                token_cached: true,
                cache_path,
                ..Default::default()
            },
        );

        Ok(Self::new(spotify))
    }
}

#[async_trait::async_trait]
impl Catalog for SpotifyClient {
    // Authorize the Spotify client via CLI prompt and OAuth flow
    // This function requires the `cli` feature of rspotify.
    async fn authorize(&self) -> Result<()> {
        debug!("Starting Spotify authorization ...");
        let url = self.spotify.get_authorize_url(false)?;
        self.spotify.prompt_for_token(&url).await?;
        Ok(())
    }

    async fn current_user(&self) -> Result<User> {
        let user = self.spotify.me().await?;
        debug!("Authenticated as user: {:?}", user.display_name);
        Ok(User::from(user))
    }

    async fn user_playlists(&self, user: &User) -> Result<Vec<PlaylistSummary>> {
        let user_id = UserId::from_id(user.id.clone())?;
        let stream = self.spotify.user_playlists(user_id);
        let playlists: Vec<PlaylistSummary> =
            stream.map_ok(PlaylistSummary::from).try_collect().await?;
        Ok(playlists)
    }

    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Track>> {
        let playlist_id = PlaylistId::from_id(playlist_id)?;
        let page = self
            .spotify
            .playlist_items_manual(playlist_id, None, None, Some(limit), Some(offset))
            .await?;
        debug!(
            "Fetched {} playlist items at offset {offset} of {}",
            page.items.len(),
            page.total
        );
        page.items.into_iter().map(Track::try_from).collect()
    }

    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>> {
        let result = self
            .spotify
            .search(query, SearchType::Track, None, None, None, None)
            .await?;
        tracks_from_search(query, result)
    }

    async fn create_playlist(&self, user: &User, name: &str, public: bool) -> Result<String> {
        let user_id = UserId::from_id(user.id.clone())?;
        let playlist = self
            .spotify
            .user_playlist_create(user_id, name, Some(public), None, None)
            .await?;
        debug!("Created playlist {} with id {}", playlist.name, playlist.id.id());
        Ok(playlist.id.id().to_owned())
    }

    async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        let playlist_id = PlaylistId::from_id(playlist_id)?;
        let items = track_ids
            .iter()
            .map(|id| TrackId::from_id(id.as_str()).map(PlayableId::Track))
            .collect::<Result<Vec<_>, _>>()?;
        self.spotify
            .playlist_add_items(playlist_id, items, None)
            .await?;
        Ok(())
    }
}
