//! Format-independent form of a user and everything it owns.
//!
//! Owner back-references are not part of the representation; they are
//! implied by nesting. Each playlist embeds full track attributes, so a
//! track shared between playlists appears once per playlist.

use serde::{Deserialize, Serialize};

use super::{
    ids::{PlaylistId, UserId},
    track::Track,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub playlists: Vec<PlaylistRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRecord {
    pub playlist_id: PlaylistId,
    pub name: String,
    pub tracks: Vec<Track>,
}
