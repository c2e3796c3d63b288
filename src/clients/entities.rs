use crate::clients::errors::{Error, Result};

/// An artist credited on a track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub name: String,
}

/// Snapshot of a catalog track. Never mutated once fetched.
///
/// Only built through `Track::try_new`, so it always has an id and at least one artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    id: String,
    name: String,
    artists: Vec<Artist>, // never empty, first one is the primary artist
    explicit: bool,
}

impl Track {
    /// Build a track from raw catalog fields, rejecting records without an id or artists.
    pub fn try_new(
        id: Option<String>,
        name: String,
        artist_names: Vec<String>,
        explicit: bool,
    ) -> Result<Self> {
        let id = id.ok_or_else(|| Error::ParseError(format!("track '{name}' has no id")))?;
        if artist_names.is_empty() {
            return Err(Error::ParseError(format!("track '{name}' has no artists")));
        }
        Ok(Track {
            id,
            name,
            artists: artist_names
                .into_iter()
                .map(|name| Artist { name })
                .collect(),
            explicit,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn into_id(self) -> String {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// Name of the first credited artist
    pub fn primary_artist(&self) -> &str {
        &self.artists[0].name
    }
}

/// A playlist as listed for a user, without its tracks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub total_tracks: u32,
}

/// The authenticated account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
}
