//! Initialize diary use case

use crate::error::{DiaryError, Result};
use crate::infrastructure::config::CONFIG_FILE;
use crate::infrastructure::Config;
use std::fs;
use std::path::Path;

/// Initialize a new diary at the specified path.
///
/// Writes a default `diary.toml` and creates the asset directory. The entry
/// document itself is created by the first save.
pub fn init(path: &Path) -> Result<Config> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    if path.join(CONFIG_FILE).exists() {
        return Err(DiaryError::Config(format!(
            "Directory already initialized: {}",
            path.display()
        )));
    }

    let config = Config::default();
    config.save_to_dir(path)?;
    fs::create_dir_all(config.asset_path(path))?;

    tracing::info!(root = %path.display(), "initialized diary");
    Ok(config)
}
