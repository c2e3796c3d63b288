use crate::clients::{
    entities::{PlaylistSummary, Track, User},
    errors::Result,
};

/// The streaming service capabilities a cleaning run needs.
///
/// `SpotifyClient` is the production implementation. Every call is a single
/// remote request (or a single paginated listing), nothing is retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Catalog: Send + Sync {
    /// Obtain a usable access token. May prompt on the terminal.
    async fn authorize(&self) -> Result<()>;

    /// The account the token belongs to
    async fn current_user(&self) -> Result<User>;

    /// Every playlist of `user`, in the order the service returns them
    async fn user_playlists(&self, user: &User) -> Result<Vec<PlaylistSummary>>;

    /// One page of a playlist's tracks
    async fn playlist_tracks(&self, playlist_id: &str, limit: u32, offset: u32)
    -> Result<Vec<Track>>;

    /// First page of a track search, in relevance order
    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>>;

    /// Create an empty playlist owned by `user` and return its id
    async fn create_playlist(&self, user: &User, name: &str, public: bool) -> Result<String>;

    /// Append tracks to a playlist. The service accepts at most 100 ids per call.
    async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<()>;
}
