use crate::error::ServiceError;

use super::{
    ids::{PlaylistId, UserId},
    track::Track,
};

/// Ordered list of tracks owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    id: PlaylistId,
    name: String,
    /// owning user, kept as an id rather than a pointer back into the user
    owner: UserId,
    tracks: Vec<Track>,
}

impl Playlist {
    pub(crate) fn new(id: PlaylistId, name: impl Into<String>, owner: UserId) -> Self {
        Self {
            id,
            name: name.into(),
            owner,
            tracks: Vec::new(),
        }
    }

    pub fn id(&self) -> PlaylistId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn contains(&self, track: &Track) -> bool {
        self.tracks.contains(track)
    }

    /// Appends a track to the end of the playlist.
    ///
    /// Fails with [`ServiceError::DuplicateTrack`] if an equal track is
    /// already present; the playlist is left untouched in that case.
    pub fn add_track(&mut self, track: Track) -> Result<(), ServiceError> {
        if self.contains(&track) {
            return Err(ServiceError::DuplicateTrack {
                playlist: self.id,
                track: track.id(),
                title: track.title().to_string(),
            });
        }
        self.tracks.push(track);
        Ok(())
    }
}
