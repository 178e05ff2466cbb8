use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::catalog::Catalog;
use crate::config;
use crate::domain::ids::{TrackId, UserId};
use crate::domain::user::User;
use crate::error::{ErrorKind, ServiceError};
use crate::storage::{self, Format};

#[derive(Parser)]
#[command(name = "tunedeck")]
#[command(version = "0.1")]
#[command(about = "Users, playlists and tracks saved as JSON or XML")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long, default_value = "tunedeck.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a sample user, save it in both formats and load it back
    Demo,
    /// Print a user file as a tree
    Show {
        file: PathBuf,
        /// Format of the file, guessed from the extension when omitted
        #[arg(short, long)]
        format: Option<Format>,
    },
    /// Load a user in one format and save it in the other
    Convert { input: PathBuf, output: PathBuf },
}

/// Entrypoint for CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let cfg = match config::Config::load_or_default(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cfg.logging.level))
        .init();

    match execute(&cli.command, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn execute(command: &Commands, cfg: &config::Config) -> anyhow::Result<()> {
    match command {
        Commands::Demo => demo(&cfg.storage.data_dir),

        Commands::Show { file, format } => {
            let format = format
                .or_else(|| Format::from_path(file))
                .unwrap_or(cfg.storage.default_format);
            let user = storage::load_user(format, file)?;
            print_user(&user);
            Ok(())
        }

        Commands::Convert { input, output } => {
            let from = format_of(input, cfg.storage.default_format);
            let to = format_of(output, cfg.storage.default_format);
            let user = storage::load_user(from, input)?;
            storage::save_user(to, output, &user)?;
            println!(
                "Converted {} ({from}) to {} ({to})",
                input.display(),
                output.display()
            );
            Ok(())
        }
    }
}

fn format_of(path: &Path, fallback: Format) -> Format {
    Format::from_path(path).unwrap_or(fallback)
}

fn demo(data_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

    let mut catalog = Catalog::new();
    catalog.create_track(TrackId(1), "Song One", 300)?;
    catalog.create_track(TrackId(2), "Song Two", 250)?;

    let playlist = catalog
        .create_user(UserId(1), "Alice", "alice@example.com")?
        .create_playlist("My Playlist")
        .id();
    catalog.add_track_to_playlist(UserId(1), playlist, TrackId(1))?;
    catalog.add_track_to_playlist(UserId(1), playlist, TrackId(2))?;

    if let Err(e) = catalog.add_track_to_playlist(UserId(1), playlist, TrackId(1)) {
        println!("Adding Song One again: {e}");
    }

    let user = catalog.get_user(UserId(1))?;
    print_user(user);

    for format in [Format::Json, Format::Xml] {
        let path = data_dir.join(format!("user.{format}"));
        storage::save_user(format, &path, user)?;
        let loaded = storage::load_user(format, &path)?;
        let status = if &loaded == user { "matches" } else { "DIFFERS" };
        println!("{} {status} the original", path.display());
    }

    catalog.delete_user(UserId(1))?;
    if let Err(e) = catalog.get_user(UserId(1)) {
        println!("After deletion: {e}");
    }

    Ok(())
}

fn print_user(user: &User) {
    println!("User {}: {} <{}>", user.id(), user.name(), user.email());
    for playlist in user.playlists() {
        println!(
            "  Playlist {}: {} ({} tracks)",
            playlist.id(),
            playlist.name(),
            playlist.len()
        );
        for track in playlist.tracks() {
            println!(
                "    - [{}] {} ({})",
                track.id(),
                track.title(),
                format_duration(track.duration())
            );
        }
    }
}

/// formats seconds as m:ss
fn format_duration(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let seconds = seconds.unsigned_abs();
    format!("{sign}{}:{:02}", seconds / 60, seconds % 60)
}

/// Prints expected failures specifically and anything else as is.
fn report(err: &anyhow::Error) {
    let Some(service) = err.downcast_ref::<ServiceError>() else {
        eprintln!("Error: {err:#}");
        return;
    };

    match service.kind() {
        ErrorKind::UserNotFound | ErrorKind::TrackNotFound | ErrorKind::PlaylistNotFound => {
            eprintln!("Not found: {service}");
        }
        ErrorKind::DuplicateTrack | ErrorKind::UserExists | ErrorKind::TrackExists => {
            eprintln!("Already present: {service}");
        }
        ErrorKind::Read | ErrorKind::Write => {
            let cause = std::error::Error::source(service)
                .map(|c| c.to_string())
                .unwrap_or_default();
            eprintln!("{service}: {cause}");
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(300), "5:00");
        assert_eq!(format_duration(61), "1:01");
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(-5), "-0:05");
    }

    #[test]
    fn test_parse_show_with_format() {
        let cli = Cli::parse_from(["tunedeck", "show", "user.dat", "--format", "xml"]);

        assert_eq!(cli.config, PathBuf::from("tunedeck.toml"));
        assert!(matches!(
            cli.command,
            Commands::Show {
                format: Some(Format::Xml),
                ..
            }
        ));
    }

    #[test]
    fn test_demo_writes_both_files() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;

        demo(dir.path())?;

        let from_json = storage::load_user(Format::Json, &dir.path().join("user.json"))?;
        let from_xml = storage::load_user(Format::Xml, &dir.path().join("user.xml"))?;
        assert_eq!(from_json, from_xml);
        assert_eq!(from_json.playlists()[0].len(), 2);
        Ok(())
    }

    #[test]
    fn test_convert_json_to_xml() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        demo(dir.path())?;
        let output = dir.path().join("converted.xml");
        let command = Commands::Convert {
            input: dir.path().join("user.json"),
            output: output.clone(),
        };

        execute(&command, &config::Config::default())?;

        assert_eq!(
            storage::load_user(Format::Xml, &output)?,
            storage::load_user(Format::Json, &dir.path().join("user.json"))?
        );
        Ok(())
    }
}
