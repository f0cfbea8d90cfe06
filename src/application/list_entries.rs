//! List entries use case

use crate::domain::DiaryEntry;
use crate::error::Result;
use crate::infrastructure::EntryRepository;

/// List entries for display. The repository always yields insertion order;
/// `newest_first` reverses it here. `limit` applies after ordering.
pub fn list_entries<R: EntryRepository>(
    repository: &R,
    newest_first: bool,
    limit: Option<usize>,
) -> Result<Vec<DiaryEntry>> {
    let mut entries = repository.get_entries()?;

    if newest_first {
        entries.reverse();
    }
    if let Some(n) = limit {
        entries.truncate(n);
    }

    Ok(entries)
}
