//! Find entry use case

use crate::domain::DiaryEntry;
use crate::error::{DiaryError, Result};
use crate::infrastructure::EntryRepository;

/// Find an entry by full id or by an unambiguous id prefix (as shown by `list`)
pub fn find_entry<R: EntryRepository>(repository: &R, id: &str) -> Result<DiaryEntry> {
    let id = id.trim();
    if id.is_empty() {
        return Err(DiaryError::EntryNotFound(id.to_string()));
    }

    if let Some(entry) = repository.find_entry(id)? {
        return Ok(entry);
    }

    let mut matches = repository
        .get_entries()?
        .into_iter()
        .filter(|entry| entry.id.starts_with(id));

    match (matches.next(), matches.next()) {
        (Some(entry), None) => Ok(entry),
        (None, _) => Err(DiaryError::EntryNotFound(id.to_string())),
        (Some(_), Some(_)) => Err(DiaryError::AmbiguousId(id.to_string())),
    }
}
