//! Command-line walkthrough of the layered data access stack.
//!
//! # Responsibility
//! - Exercise the facade and repository paths against a real database
//!   file, printing each step for manual inspection.

use musiclib_core::{
    default_log_level, init_logging, Artist, Repository, SqliteDbFactory, SqliteRepositoryFactory,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let database_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("database").join("music.db"));

    let log_dir = std::env::temp_dir().join("musiclib-logs");
    if let Some(log_dir) = log_dir.to_str() {
        if let Err(err) = init_logging(default_log_level(), log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    println!("musiclib {} using {}", musiclib_core::core_version(), database_path.display());

    if let Err(err) = run(&database_path) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(database_path: &Path) -> Result<(), Box<dyn Error>> {
    facade_walkthrough(database_path)?;
    repository_walkthrough(database_path)?;
    Ok(())
}

/// DAO-facade path: sentinel-style results, raw rows.
fn facade_walkthrough(database_path: &Path) -> Result<(), Box<dyn Error>> {
    println!("-- facade --");
    let factory = SqliteDbFactory::try_new(database_path)?;

    let id = factory.create_artist("Facade Artist")?;
    if id == -1 {
        println!("create made no progress (datastore busy)");
        return Ok(());
    }
    println!("created artist id={id}");

    let affected = factory.update_artist(id, "Updated Facade Artist")?;
    println!("update affected {affected} row(s)");

    if let Some(row) = factory.get_artist_by_id(id)? {
        println!("fetched name={:?}", row.text("name"));
    }

    let affected = factory.delete_artist(id)?;
    println!("delete affected {affected} row(s)");
    println!("{} artist(s) remain", factory.get_all_artists()?.len());
    Ok(())
}

/// Repository path: domain values, option/count results.
fn repository_walkthrough(database_path: &Path) -> Result<(), Box<dyn Error>> {
    println!("-- repository --");
    let factory = SqliteRepositoryFactory::try_new(database_path)?;
    let repository = factory.artist_repository()?;

    let mut artist = Artist::new("Repo Artist");
    match repository.add(&mut artist)? {
        Some(id) => println!("created artist id={id}"),
        None => {
            println!("add refused or made no progress");
            return Ok(());
        }
    }

    artist.name = Some("Updated Repo Artist".to_string());
    println!("update affected {} row(s)", repository.update(&artist)?);

    if let Some(id) = artist.id {
        if let Some(found) = repository.get_by_id(id)? {
            println!("fetched name={:?}", found.name);
        }
        println!("delete affected {} row(s)", repository.delete(id)?);
    }

    for artist in repository.get_all()? {
        println!("remaining: id={:?} name={:?}", artist.id, artist.name);
    }
    Ok(())
}
