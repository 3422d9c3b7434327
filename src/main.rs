mod app;
mod cli;
mod db;
mod logging;
mod paths;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    if let Err(err) = logging::init() {
        eprintln!("Warning: could not set up logging: {err:#}");
    }
    app::run(cli)
}
