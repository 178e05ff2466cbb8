use serde::{Deserialize, Serialize};

use super::ids::TrackId;

/// Represent a music track
///
/// Tracks are immutable once created. Two tracks are equal when id, title
/// and duration all match, so a copy decoded from a file compares equal to
/// the catalog's original.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    #[serde(rename = "track_id")]
    id: TrackId,
    title: String,
    /// length in seconds
    duration: i64,
}

impl Track {
    pub fn new(id: TrackId, title: impl Into<String>, duration: i64) -> Self {
        Self {
            id,
            title: title.into(),
            duration,
        }
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn duration(&self) -> i64 {
        self.duration
    }
}
