mod builder;
mod flow;
mod picker;
mod show;
mod store;
mod tui;


use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::{Cli, Command};
use crate::db::Database;
use crate::paths::database_file_path;

pub(crate) use self::picker::{DEFAULT_ATTEMPTS, PickError, Picker};
pub(crate) use self::show::{Show, decode_season_lengths, encode_season_lengths};
pub(crate) use self::store::{StoreError, WatchStore};

pub fn run(cli: Cli) -> Result<()> {
    let db = open_db(&cli)?;
    let picker = Picker {
        max_attempts: cli.attempts,
        exhaustive_fallback: cli.exhaustive,
    };

    match cli.command {
        Some(Command::List) => run_list(&db)?,
        Some(Command::Pick { ref name }) => run_pick(&db, picker, name)?,
        Some(Command::Tui) | None => tui::run_tui(&db, picker)?,
    }

    Ok(())
}

fn run_list(db: &Database) -> Result<()> {
    let shows = db.list_shows()?;
    if shows.is_empty() {
        println!("No shows yet. Run `random-episode` and choose \"Add show\".");
        return Ok(());
    }

    println!(
        "{:<40} {:>8} {:>9} {:>8}  {}",
        "SHOW", "SEASONS", "EPISODES", "WATCHED", "STATUS"
    );
    for show in shows {
        let watched = db.watched_count(&show.name)?;
        println!(
            "{:<40} {:>8} {:>9} {:>8}  {}",
            truncate(&show.name, 40),
            show.season_count(),
            show.episode_count(),
            watched,
            if show.deleted { "deleted" } else { "active" }
        );
    }
    Ok(())
}

fn run_pick(db: &Database, picker: Picker, name: &str) -> Result<()> {
    let shows = db.list_shows()?;
    let Some(show) = shows.iter().find(|show| show.name == name && !show.deleted) else {
        bail!("no active show named '{name}'");
    };

    match picker.pick(db, show, &mut rand::rng()) {
        Ok(episode) => println!("{}: {episode}", show.name),
        Err(PickError::Store(err)) => {
            return Err(err).with_context(|| format!("failed to pick episode for {}", show.name));
        }
        Err(err) => println!("{}: {err}", show.name),
    }
    Ok(())
}

fn open_db(cli: &Cli) -> Result<Database> {
    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => database_file_path()?,
    };
    let db = Database::open(&db_path)?;
    db.migrate()?;
    info!(path = %db_path.display(), "opened database");
    Ok(db)
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    let mut out = s.to_string();
    if out.chars().count() > max {
        out = out.chars().take(max.saturating_sub(3)).collect::<String>() + "...";
    }
    out
}
