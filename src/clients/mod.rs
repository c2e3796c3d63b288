/// Capabilities of the remote streaming service
pub mod catalog;
/// Data entities for tracks, playlists and users
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Spotify API client
pub mod spotify;

pub use catalog::Catalog;
pub use spotify::SpotifyClient;
