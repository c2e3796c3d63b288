//! Rcleaner - make a clean copy of a Spotify playlist
//!
//! This library finds a playlist by name, looks up a clean version of every
//! explicit track in it and writes the clean tracks plus the replacements into a
//! new playlist.

/// The cleaning pipeline and its configuration
pub mod cleaner;
/// Client modules for interacting with the streaming service
pub mod clients;
