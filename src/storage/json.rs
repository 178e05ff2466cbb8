use std::{io::Write, path::Path};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::{
    domain::representation::UserRecord,
    error::ServiceError,
    storage::{Codec, error::CodecError, read_file, write_file},
};

const INDENT: &[u8] = b"    ";

/// Stores the [`UserRecord`] representation as indented JSON.
///
/// Keys are written in declaration order; on load the order does not
/// matter but every key is required.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    type Document = UserRecord;

    fn save(&self, target: &Path, document: &UserRecord) -> Result<(), ServiceError> {
        write_file(target, |writer| {
            let mut serializer =
                serde_json::Serializer::with_formatter(&mut *writer, PrettyFormatter::with_indent(INDENT));
            document.serialize(&mut serializer)?;
            writer.write_all(b"\n")?;
            Ok(())
        })
    }

    fn load(&self, target: &Path) -> Result<UserRecord, ServiceError> {
        read_file(target, |reader| {
            serde_json::from_reader(reader).map_err(CodecError::from)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use crate::{
        domain::{
            ids::{TrackId, UserId},
            representation::UserRecord,
            track::Track,
            user::User,
        },
        error::{ErrorKind, ServiceError},
        storage::{Codec, JsonCodec, error::CodecError},
    };

    fn record() -> anyhow::Result<UserRecord> {
        let mut user = User::new(UserId(1), "Алиса", "a@x.com");
        let playlist = user.create_playlist("My Playlist");
        playlist.add_track(Track::new(TrackId(1), "Song One", 300))?;
        playlist.add_track(Track::new(TrackId(2), "Song Two", 250))?;
        Ok(user.to_representation())
    }

    #[test]
    fn save_then_load_returns_equal_record() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("user.json");
        let original = record()?;

        JsonCodec.save(&path, &original)?;
        let loaded = JsonCodec.load(&path)?;

        assert_eq!(loaded, original);
        Ok(())
    }

    #[test]
    fn saved_file_is_indented_with_stable_key_order() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("user.json");

        JsonCodec.save(&path, &record()?)?;
        let text = fs::read_to_string(&path)?;

        assert!(text.starts_with("{\n    \"user_id\": 1,\n    \"name\": \"Алиса\",\n    \"email\""));
        assert!(text.ends_with("}\n"));
        let user_id = text.find("\"user_id\"");
        let playlists = text.find("\"playlists\"");
        assert!(user_id < playlists);
        Ok(())
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = JsonCodec.load(&path).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Read);
        assert!(matches!(
            err,
            ServiceError::Read { source: CodecError::Io(_), .. }
        ));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn load_malformed_or_incomplete_document_is_read_error() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let malformed = dir.path().join("malformed.json");
        let incomplete = dir.path().join("incomplete.json");
        fs::write(&malformed, "{ \"user_id\": 1, ")?;
        fs::write(&incomplete, r#"{"user_id": 1, "name": "Alice", "playlists": []}"#)?;

        for path in [malformed, incomplete] {
            let err = JsonCodec.load(&path).unwrap_err();
            assert!(matches!(
                err,
                ServiceError::Read { source: CodecError::Json(_), .. }
            ));
        }
        Ok(())
    }

    #[test]
    fn save_to_unwritable_path_is_write_error() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("no_such_dir").join("user.json");

        let err = JsonCodec.save(&path, &record()?).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Write);
        assert!(!path.exists());
        Ok(())
    }
}
