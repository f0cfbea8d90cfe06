//! JSON-document entry repository

use crate::domain::{DiaryEntry, DraftEntry};
use crate::error::Result;
use crate::infrastructure::assets::{AssetKind, ImageAssetStore};
use crate::infrastructure::Config;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of reading the backing document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSnapshot {
    /// Parsed entries, in insertion order
    Loaded(Vec<DiaryEntry>),
    /// No document yet (first run)
    Missing,
    /// Document present but unreadable as an entry list
    Corrupt(String),
}

impl StoreSnapshot {
    /// Collapse to a list: missing and corrupt documents read as empty
    pub fn into_entries(self) -> Vec<DiaryEntry> {
        match self {
            StoreSnapshot::Loaded(entries) => entries,
            StoreSnapshot::Missing | StoreSnapshot::Corrupt(_) => Vec::new(),
        }
    }
}

/// Abstract repository for diary entries
pub trait EntryRepository {
    /// Read every entry in insertion order. Never fails on a missing or
    /// corrupt document; those read as empty.
    fn load_all(&self) -> Result<Vec<DiaryEntry>>;

    /// Persist the draft's images, then append a new entry built from it.
    fn save_entry(&self, draft: &DraftEntry) -> Result<DiaryEntry>;

    /// Read-side entry point for display layers; same as `load_all`
    fn get_entries(&self) -> Result<Vec<DiaryEntry>> {
        self.load_all()
    }

    /// Look up a single entry by id
    fn find_entry(&self, id: &str) -> Result<Option<DiaryEntry>> {
        Ok(self.load_all()?.into_iter().find(|entry| entry.id == id))
    }
}

/// Entries in one JSON array file, images in an asset directory next to it.
///
/// Every save rewrites the whole document. There is no locking: a second
/// process saving at the same time can drop the other's entry.
#[derive(Debug, Clone)]
pub struct JsonEntryRepository {
    root: PathBuf,
    document: PathBuf,
    assets: ImageAssetStore,
}

impl JsonEntryRepository {
    /// Create a repository under `root` using the paths from `config`
    pub fn new(root: PathBuf, config: &Config) -> Self {
        JsonEntryRepository {
            document: config.document_path(&root),
            assets: ImageAssetStore::new(root.clone(), config.asset_dir.clone()),
            root,
        }
    }

    /// Resolve the diary root: `DIARY_ROOT` if set, else the current directory
    pub fn discover() -> Result<PathBuf> {
        if let Ok(root_path) = std::env::var("DIARY_ROOT") {
            if !root_path.is_empty() {
                return Ok(PathBuf::from(root_path));
            }
        }
        Ok(std::env::current_dir()?)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn document_path(&self) -> &Path {
        &self.document
    }

    pub fn assets(&self) -> &ImageAssetStore {
        &self.assets
    }

    /// Read the backing document, keeping missing and corrupt apart
    pub fn read_document(&self) -> Result<StoreSnapshot> {
        let contents = match fs::read_to_string(&self.document) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoreSnapshot::Missing);
            }
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                // Not UTF-8
                return Ok(StoreSnapshot::Corrupt(e.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Vec<DiaryEntry>>(&contents) {
            Ok(entries) => Ok(StoreSnapshot::Loaded(entries)),
            Err(e) => Ok(StoreSnapshot::Corrupt(e.to_string())),
        }
    }

    /// Serialize `entries` with 4-space indentation, non-ASCII kept verbatim
    fn render_document(entries: &[DiaryEntry]) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        entries.serialize(&mut serializer)?;
        buffer.push(b'\n');
        Ok(buffer)
    }

    /// Replace the document: write a sibling temp file, then rename into place.
    fn write_document(&self, contents: &[u8]) -> Result<()> {
        if let Some(parent) = self.document.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_name = format!(
            "{}.diary-tmp-{}",
            self.document
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("diary.json"),
            std::process::id()
        );
        let tmp_path = self.document.with_file_name(tmp_name);

        fs::write(&tmp_path, contents)?;

        // Windows rename does not overwrite.
        if cfg!(windows) && self.document.exists() {
            fs::remove_file(&self.document)?;
        }

        if let Err(e) = fs::rename(&tmp_path, &self.document) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }
}

impl EntryRepository for JsonEntryRepository {
    fn load_all(&self) -> Result<Vec<DiaryEntry>> {
        let snapshot = self.read_document()?;
        if let StoreSnapshot::Corrupt(reason) = &snapshot {
            tracing::warn!(
                path = %self.document.display(),
                %reason,
                "diary document is unreadable, treating it as empty"
            );
        }
        Ok(snapshot.into_entries())
    }

    fn save_entry(&self, draft: &DraftEntry) -> Result<DiaryEntry> {
        let id = DiaryEntry::new_id();

        // Images go to disk before the document references them.
        let memory_path =
            self.assets
                .save_image(draft.memory.as_ref(), AssetKind::Memory, &draft.location)?;
        let doodle_path =
            self.assets
                .save_image(draft.doodle.as_ref(), AssetKind::Doodle, &draft.location)?;

        let entry = DiaryEntry {
            id,
            date: draft.date.clone(),
            location: draft.location.clone(),
            text: draft.text.clone(),
            memory_title: draft.memory_title.clone(),
            keyword: draft.keyword.clone(),
            memory_path,
            doodle_path,
        };

        let mut entries = self.load_all()?;
        entries.push(entry.clone());

        let contents = Self::render_document(&entries)?;
        self.write_document(&contents)?;

        tracing::info!(
            id = %entry.id,
            location = %entry.location,
            total = entries.len(),
            "saved diary entry"
        );
        Ok(entry)
    }
}
