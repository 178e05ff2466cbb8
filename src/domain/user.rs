use crate::error::ServiceError;

use super::{
    ids::{PlaylistId, UserId},
    playlist::Playlist,
    representation::{PlaylistRecord, UserRecord},
};

/// A catalog user together with the playlists it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    playlists: Vec<Playlist>,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            playlists: Vec::new(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// playlists in creation order
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn playlist(&self, id: PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id() == id)
    }

    pub fn playlist_mut(&mut self, id: PlaylistId) -> Option<&mut Playlist> {
        self.playlists.iter_mut().find(|p| p.id() == id)
    }

    /// Creates an empty playlist owned by this user.
    ///
    /// The id is one more than the number of existing playlists. Names are
    /// not required to be unique.
    pub fn create_playlist(&mut self, name: impl Into<String>) -> &mut Playlist {
        let id = PlaylistId(self.playlists.len() as i64 + 1);
        let name = name.into();
        log::debug!("user {} created playlist {id} '{name}'", self.id);
        self.push_playlist(Playlist::new(id, name, self.id))
    }

    fn push_playlist(&mut self, playlist: Playlist) -> &mut Playlist {
        let index = self.playlists.len();
        self.playlists.push(playlist);
        &mut self.playlists[index]
    }

    pub fn to_representation(&self) -> UserRecord {
        UserRecord {
            user_id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            playlists: self
                .playlists
                .iter()
                .map(|playlist| PlaylistRecord {
                    playlist_id: playlist.id(),
                    name: playlist.name().to_string(),
                    tracks: playlist.tracks().to_vec(),
                })
                .collect(),
        }
    }

    /// Rebuilds a user from its representation.
    ///
    /// Every playlist gets the rebuilt user as owner. Tracks go through
    /// [`Playlist::add_track`], so a playlist listing the same track twice
    /// is rejected with [`ServiceError::DuplicateTrack`].
    pub fn from_representation(record: UserRecord) -> Result<Self, ServiceError> {
        let mut user = Self::new(record.user_id, record.name, record.email);
        for playlist_record in record.playlists {
            let playlist = user.push_playlist(Playlist::new(
                playlist_record.playlist_id,
                playlist_record.name,
                record.user_id,
            ));
            for track in playlist_record.tracks {
                playlist.add_track(track)?;
            }
        }
        Ok(user)
    }
}
