use crate::{
    domain::{
        ids::{PlaylistId, TrackId, UserId},
        track::Track,
        user::User,
    },
    error::ServiceError,
};

/// In-memory registry of users and tracks.
///
/// Both collections keep insertion order and hold at most one entry per
/// id. Lookups scan linearly. The catalog itself is never persisted, only
/// individual users through a [`crate::storage::Codec`].
#[derive(Debug, Default)]
pub struct Catalog {
    users: Vec<User>,
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Registers a new user without playlists.
    ///
    /// Fails with [`ServiceError::UserExists`] if the id is taken.
    pub fn create_user(
        &mut self,
        user_id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<&mut User, ServiceError> {
        self.import_user(User::new(user_id, name, email))
    }

    /// Registers an already built user, e.g. one loaded from a file.
    ///
    /// Tracks inside its playlists are not added to the catalog's tracks.
    pub fn import_user(&mut self, user: User) -> Result<&mut User, ServiceError> {
        if self.users.iter().any(|u| u.id() == user.id()) {
            return Err(ServiceError::UserExists(user.id()));
        }
        log::debug!("registered user {} '{}'", user.id(), user.name());
        let index = self.users.len();
        self.users.push(user);
        Ok(&mut self.users[index])
    }

    pub fn get_user(&self, user_id: UserId) -> Result<&User, ServiceError> {
        self.users
            .iter()
            .find(|u| u.id() == user_id)
            .ok_or(ServiceError::UserNotFound(user_id))
    }

    pub fn get_user_mut(&mut self, user_id: UserId) -> Result<&mut User, ServiceError> {
        self.users
            .iter_mut()
            .find(|u| u.id() == user_id)
            .ok_or(ServiceError::UserNotFound(user_id))
    }

    /// Removes a user together with its playlists and returns it.
    pub fn delete_user(&mut self, user_id: UserId) -> Result<User, ServiceError> {
        let index = self
            .users
            .iter()
            .position(|u| u.id() == user_id)
            .ok_or(ServiceError::UserNotFound(user_id))?;
        let user = self.users.remove(index);
        log::info!("user with id {user_id} deleted");
        Ok(user)
    }

    /// Registers a new track.
    ///
    /// Fails with [`ServiceError::TrackExists`] if the id is taken.
    pub fn create_track(
        &mut self,
        track_id: TrackId,
        title: impl Into<String>,
        duration: i64,
    ) -> Result<&Track, ServiceError> {
        if self.tracks.iter().any(|t| t.id() == track_id) {
            return Err(ServiceError::TrackExists(track_id));
        }
        let track = Track::new(track_id, title, duration);
        log::debug!("registered track {track_id} '{}'", track.title());
        let index = self.tracks.len();
        self.tracks.push(track);
        Ok(&self.tracks[index])
    }

    pub fn get_track(&self, track_id: TrackId) -> Result<&Track, ServiceError> {
        self.tracks
            .iter()
            .find(|t| t.id() == track_id)
            .ok_or(ServiceError::TrackNotFound(track_id))
    }

    /// Appends a catalog track to one of a user's playlists.
    pub fn add_track_to_playlist(
        &mut self,
        user_id: UserId,
        playlist_id: PlaylistId,
        track_id: TrackId,
    ) -> Result<(), ServiceError> {
        let track = self.get_track(track_id)?.clone();
        self.get_user_mut(user_id)?
            .playlist_mut(playlist_id)
            .ok_or(ServiceError::PlaylistNotFound {
                user: user_id,
                playlist: playlist_id,
            })?
            .add_track(track)
    }
}
