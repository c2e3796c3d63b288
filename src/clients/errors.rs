use rspotify::ClientError;
use rspotify::model::IdError;
use thiserror::Error;

/// Errors that abort a cleaning run
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to parse Spotify data, error: {0}")]
    ParseError(String),

    #[error("Spotify error: {0}")]
    SpotifyError(#[from] ClientError),

    #[error("Invalid Spotify id: {0}")]
    InvalidId(#[from] IdError),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Result alias used across the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}
