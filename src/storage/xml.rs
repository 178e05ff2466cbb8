//! Tagged-tree format.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <User id="1" name="Alice" email="a@x.com">
//!   <Playlist id="1" name="My Playlist">
//!     <Track id="1" title="Song One" duration="300"/>
//!   </Playlist>
//! </User>
//! ```
//!
//! Every attribute is text; ids and durations are parsed back as integers.

use std::{
    io::{BufRead, Write},
    path::Path,
    str::FromStr,
};

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, Event},
};

use crate::{
    domain::{
        representation::{PlaylistRecord, UserRecord},
        track::Track,
        user::User,
    },
    error::ServiceError,
    storage::{Codec, error::CodecError, read_file, write_file},
};

const USER: &str = "User";
const PLAYLIST: &str = "Playlist";
const TRACK: &str = "Track";

/// Stores a [`User`] as a tree of `User`, `Playlist` and `Track` elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCodec;

impl Codec for XmlCodec {
    type Document = User;

    fn save(&self, target: &Path, document: &User) -> Result<(), ServiceError> {
        write_file(target, |writer| write_user(writer, document))
    }

    fn load(&self, target: &Path) -> Result<User, ServiceError> {
        read_file(target, |reader| {
            let record = read_user(&mut Reader::from_reader(reader))?;
            Ok(User::from_representation(record)?)
        })
    }
}

fn write_user<W: Write>(out: W, user: &User) -> Result<(), CodecError> {
    let mut writer = Writer::new_with_indent(out, b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let user_id = user.id().to_string();
    let root = BytesStart::new(USER).with_attributes([
        ("id", user_id.as_str()),
        ("name", user.name()),
        ("email", user.email()),
    ]);

    if user.playlists().is_empty() {
        writer.write_event(Event::Empty(root))?;
    } else {
        writer.write_event(Event::Start(root))?;
        for playlist in user.playlists() {
            let playlist_id = playlist.id().to_string();
            let start = BytesStart::new(PLAYLIST)
                .with_attributes([("id", playlist_id.as_str()), ("name", playlist.name())]);

            if playlist.is_empty() {
                writer.write_event(Event::Empty(start))?;
                continue;
            }

            writer.write_event(Event::Start(start))?;
            for track in playlist.tracks() {
                let track_id = track.id().to_string();
                let duration = track.duration().to_string();
                writer.write_event(Event::Empty(BytesStart::new(TRACK).with_attributes([
                    ("id", track_id.as_str()),
                    ("title", track.title()),
                    ("duration", duration.as_str()),
                ])))?;
            }
            writer.write_event(Event::End(BytesEnd::new(PLAYLIST)))?;
        }
        writer.write_event(Event::End(BytesEnd::new(USER)))?;
    }

    writer.get_mut().write_all(b"\n")?;
    Ok(())
}

/// Nesting level of the element currently being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Document,
    User,
    Playlist,
    Track,
}

impl Level {
    fn child(self) -> Self {
        match self {
            Level::Document => Level::User,
            Level::User => Level::Playlist,
            Level::Playlist | Level::Track => Level::Track,
        }
    }

    fn parent(self) -> Self {
        match self {
            Level::Document | Level::User => Level::Document,
            Level::Playlist => Level::User,
            Level::Track => Level::Playlist,
        }
    }
}

fn read_user<R: BufRead>(reader: &mut Reader<R>) -> Result<UserRecord, CodecError> {
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut user: Option<UserRecord> = None;
    let mut level = Level::Document;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => {
                open_element(&start, level, &mut user)?;
                level = level.child();
            }
            Event::Empty(start) => open_element(&start, level, &mut user)?,
            Event::End(_) => level = level.parent(),
            Event::Eof => break,
            // declaration, comments, whitespace and stray text carry no data
            _ => {}
        }
        buf.clear();
    }

    if level != Level::Document {
        return Err(CodecError::UnexpectedEof);
    }
    user.ok_or(CodecError::MissingRoot)
}

/// Adds the element opened at `level` to the record being built.
fn open_element(
    start: &BytesStart,
    level: Level,
    user: &mut Option<UserRecord>,
) -> Result<(), CodecError> {
    let qname = start.name();
    let tag = String::from_utf8_lossy(qname.as_ref());

    match level {
        Level::Document if user.is_none() && tag == USER => {
            let [id, name, email] = attributes(start, USER, ["id", "name", "email"])?;
            *user = Some(UserRecord {
                user_id: parse_number(USER, "id", &id)?,
                name,
                email,
                playlists: Vec::new(),
            });
        }
        Level::User if tag == PLAYLIST => {
            let [id, name] = attributes(start, PLAYLIST, ["id", "name"])?;
            let playlist = PlaylistRecord {
                playlist_id: parse_number(PLAYLIST, "id", &id)?,
                name,
                tracks: Vec::new(),
            };
            if let Some(user) = user.as_mut() {
                user.playlists.push(playlist);
            }
        }
        Level::Playlist if tag == TRACK => {
            let [id, title, duration] = attributes(start, TRACK, ["id", "title", "duration"])?;
            let track = Track::new(
                parse_number(TRACK, "id", &id)?,
                title,
                parse_number(TRACK, "duration", &duration)?,
            );
            if let Some(playlist) = user.as_mut().and_then(|u| u.playlists.last_mut()) {
                playlist.tracks.push(track);
            }
        }
        _ => {
            return Err(CodecError::UnexpectedElement {
                found: tag.into_owned(),
                expected: match level {
                    Level::Document if user.is_none() => "<User>",
                    Level::Document => "end of document",
                    Level::User => "<Playlist>",
                    Level::Playlist => "<Track>",
                    Level::Track => "no child elements",
                },
            });
        }
    }
    Ok(())
}

/// Collects the named attributes of `start`, failing on the first missing one.
fn attributes<const N: usize>(
    start: &BytesStart,
    element: &'static str,
    names: [&'static str; N],
) -> Result<[String; N], CodecError> {
    let mut found: [Option<String>; N] = std::array::from_fn(|_| None);

    for attr in start.attributes() {
        let attr = attr?;
        let key = attr.key.as_ref();
        if let Some(slot) = names
            .iter()
            .position(|name| name.as_bytes() == key)
            .and_then(|i| found.get_mut(i))
        {
            *slot = Some(attr.unescape_value()?.into_owned());
        }
    }

    let mut values: [String; N] = std::array::from_fn(|_| String::new());
    for ((value, slot), attribute) in values.iter_mut().zip(found).zip(names) {
        *value = slot.ok_or(CodecError::MissingAttribute { element, attribute })?;
    }
    Ok(values)
}

fn parse_number<T: FromStr>(
    element: &'static str,
    attribute: &'static str,
    value: &str,
) -> Result<T, CodecError> {
    value.trim().parse().map_err(|_| CodecError::InvalidNumber {
        element,
        attribute,
        value: value.to_string(),
    })
}
