use std::path::PathBuf;

use anyhow::{Context, Result};

const APP_DIR: &str = "random-episode";

pub fn data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("unable to resolve data directory")?;
    Ok(base.join(APP_DIR))
}

pub fn database_file_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("data.db"))
}
