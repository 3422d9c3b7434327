use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::DEFAULT_ATTEMPTS;

#[derive(Debug, Parser)]
#[command(
    name = "random-episode",
    version,
    about = "Track TV shows and pick a random unwatched episode"
)]
pub struct Cli {
    /// Database file to use instead of the one in the data directory.
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Random draws before giving up on finding an unwatched episode.
    #[arg(long, global = true, value_name = "N", default_value_t = DEFAULT_ATTEMPTS,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub attempts: u32,

    /// Scan every episode once the random draws are used up.
    #[arg(long, global = true)]
    pub exhaustive: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive menu (default).
    Tui,
    /// Print tracked shows and watch progress.
    List,
    /// Pick an unwatched episode of a show without recording it.
    Pick { name: String },
}
