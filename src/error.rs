use std::path::PathBuf;

use thiserror::Error;

use crate::{
    domain::ids::{PlaylistId, TrackId, UserId},
    storage::error::CodecError,
};

/// Root error for every catalog, playlist and codec operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("user with id {0} not found")]
    UserNotFound(UserId),

    #[error("track with id {0} not found")]
    TrackNotFound(TrackId),

    #[error("playlist {playlist} of user {user} not found")]
    PlaylistNotFound { user: UserId, playlist: PlaylistId },

    #[error("track '{title}' is already in the playlist")]
    DuplicateTrack {
        playlist: PlaylistId,
        track: TrackId,
        title: String,
    },

    #[error("user with id {0} already exists")]
    UserExists(UserId),

    #[error("track with id {0} already exists")]
    TrackExists(TrackId),

    #[error("error reading from file '{}'", .target.display())]
    Read {
        target: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("error writing to file '{}'", .target.display())]
    Write {
        target: PathBuf,
        #[source]
        source: CodecError,
    },
}

/// Fieldless view of [`ServiceError`] for callers that only branch on the
/// kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UserNotFound,
    TrackNotFound,
    PlaylistNotFound,
    DuplicateTrack,
    UserExists,
    TrackExists,
    Read,
    Write,
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::UserNotFound(_) => ErrorKind::UserNotFound,
            ServiceError::TrackNotFound(_) => ErrorKind::TrackNotFound,
            ServiceError::PlaylistNotFound { .. } => ErrorKind::PlaylistNotFound,
            ServiceError::DuplicateTrack { .. } => ErrorKind::DuplicateTrack,
            ServiceError::UserExists(_) => ErrorKind::UserExists,
            ServiceError::TrackExists(_) => ErrorKind::TrackExists,
            ServiceError::Read { .. } => ErrorKind::Read,
            ServiceError::Write { .. } => ErrorKind::Write,
        }
    }

    pub(crate) fn read(target: impl Into<PathBuf>, source: impl Into<CodecError>) -> Self {
        ServiceError::Read {
            target: target.into(),
            source: source.into(),
        }
    }

    pub(crate) fn write(target: impl Into<PathBuf>, source: impl Into<CodecError>) -> Self {
        ServiceError::Write {
            target: target.into(),
            source: source.into(),
        }
    }
}
