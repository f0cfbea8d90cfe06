//! Infrastructure layer - External I/O and persistence

pub mod assets;
pub mod config;
pub mod repository;
pub mod story;

pub use assets::{AssetKind, ImageAssetStore};
pub use config::Config;
pub use repository::{EntryRepository, JsonEntryRepository, StoreSnapshot};
pub use story::{ChatClient, StoryTeller};
