//! Persistence of a single user's playlist graph.
//!
//! Two interchangeable formats share the [`Codec`] contract: a JSON file
//! holding the [`UserRecord`] representation and an XML tree of tagged
//! elements. Files are overwritten as a whole; a failure midway leaves the
//! target in an undefined state.

use std::{
    fmt::Display,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::Deserialize;

use crate::{domain::user::User, error::ServiceError, storage::error::CodecError};

pub mod error;
pub mod json;
pub mod xml;

pub use json::JsonCodec;
pub use xml::XmlCodec;

/// A save/load pair for one external format.
pub trait Codec {
    /// what the codec reads and writes
    type Document;

    /// Overwrites `target` with the encoded document.
    ///
    /// Any i/o or encoding fault is reported as [`ServiceError::Write`].
    fn save(&self, target: &Path, document: &Self::Document) -> Result<(), ServiceError>;

    /// Reads and decodes `target`.
    ///
    /// Any i/o or decoding fault is reported as [`ServiceError::Read`].
    fn load(&self, target: &Path) -> Result<Self::Document, ServiceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Xml,
}

impl Format {
    /// guesses the format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(Format::Json),
            "xml" => Some(Format::Xml),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Saves a user in the given format.
pub fn save_user(format: Format, target: &Path, user: &User) -> Result<(), ServiceError> {
    match format {
        Format::Json => JsonCodec.save(target, &user.to_representation()),
        Format::Xml => XmlCodec.save(target, user),
    }
}

/// Loads a user from the given format, rebuilding owner links.
pub fn load_user(format: Format, target: &Path) -> Result<User, ServiceError> {
    match format {
        Format::Json => {
            let record = JsonCodec.load(target)?;
            User::from_representation(record).map_err(|e| ServiceError::read(target, e))
        }
        Format::Xml => XmlCodec.load(target),
    }
}

/// Opens `target` for writing, runs `encode` and flushes.
fn write_file<F>(target: &Path, encode: F) -> Result<(), ServiceError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), CodecError>,
{
    (|| -> Result<(), CodecError> {
        let mut writer = BufWriter::new(File::create(target)?);
        encode(&mut writer)?;
        writer.flush()?;
        Ok(())
    })()
    .map_err(|e| ServiceError::write(target, e))?;

    log::info!("saved {}", target.display());
    Ok(())
}

/// Opens `target` for reading and runs `decode` on it.
fn read_file<T, F>(target: &Path, decode: F) -> Result<T, ServiceError>
where
    F: FnOnce(BufReader<File>) -> Result<T, CodecError>,
{
    let document = File::open(target)
        .map_err(CodecError::from)
        .and_then(|file| decode(BufReader::new(file)))
        .map_err(|e| ServiceError::read(target, e))?;

    log::info!("loaded {}", target.display());
    Ok(document)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::tempdir;

    use crate::{
        domain::{
            ids::{TrackId, UserId},
            track::Track,
            user::User,
        },
        error::ErrorKind,
        storage::{Format, load_user, save_user},
    };

    fn alice() -> anyhow::Result<User> {
        let mut user = User::new(UserId(1), "Alice", "a@x.com");
        let playlist = user.create_playlist("My Playlist");
        playlist.add_track(Track::new(TrackId(1), "Song One", 300))?;
        playlist.add_track(Track::new(TrackId(2), "Song Two", 250))?;
        user.create_playlist("Empty");
        Ok(user)
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a/user.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("user.XML")), Some(Format::Xml));
        assert_eq!(Format::from_path(Path::new("user.toml")), None);
        assert_eq!(Format::from_path(Path::new("user")), None);
    }

    #[test]
    fn both_formats_round_trip_the_same_user() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let user = alice()?;

        for format in [Format::Json, Format::Xml] {
            let path = dir.path().join(format!("user.{format}"));
            save_user(format, &path, &user)?;
            let loaded = load_user(format, &path)?;
            assert_eq!(loaded, user, "format {format}");
        }
        Ok(())
    }

    #[test]
    fn converting_between_formats_preserves_user() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let json = dir.path().join("user.json");
        let xml = dir.path().join("user.xml");

        save_user(Format::Json, &json, &alice()?)?;
        let from_json = load_user(Format::Json, &json)?;
        save_user(Format::Xml, &xml, &from_json)?;

        assert_eq!(load_user(Format::Xml, &xml)?, alice()?);
        Ok(())
    }

    #[test]
    fn json_with_duplicate_track_is_a_read_error() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("dup.json");
        std::fs::write(
            &path,
            r#"{"user_id": 1, "name": "A", "email": "e", "playlists": [
                {"playlist_id": 1, "name": "p", "tracks": [
                    {"track_id": 1, "title": "t", "duration": 1},
                    {"track_id": 1, "title": "t", "duration": 1}
                ]}
            ]}"#,
        )?;

        let err = load_user(Format::Json, &path).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Read);
        Ok(())
    }
}
