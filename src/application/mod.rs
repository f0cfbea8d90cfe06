//! Application layer - Use cases and orchestration

pub mod ask_ai;
pub mod find_entry;
pub mod init;
pub mod list_entries;
pub mod orphans;
pub mod record_entry;

pub use ask_ai::{Reply, StoryService};
pub use find_entry::find_entry;
pub use list_entries::list_entries;
pub use orphans::find_orphans;
pub use record_entry::{RecordEntryService, Sticker, TextStamp};
