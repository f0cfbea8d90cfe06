//! Report image files no entry references

use crate::error::Result;
use crate::infrastructure::{EntryRepository, JsonEntryRepository};
use std::collections::HashSet;
use std::path::PathBuf;

/// Asset files left behind by saves that failed after writing their images.
/// Only reports them; nothing is deleted.
pub fn find_orphans(repository: &JsonEntryRepository) -> Result<Vec<PathBuf>> {
    let referenced: HashSet<PathBuf> = repository
        .get_entries()?
        .into_iter()
        .flat_map(|entry| [entry.memory_path, entry.doodle_path])
        .flatten()
        .collect();

    Ok(repository
        .assets()
        .list_assets()
        .into_iter()
        .filter(|asset| !referenced.contains(asset))
        .collect())
}
