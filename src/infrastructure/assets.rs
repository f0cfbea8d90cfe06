//! Image asset store: photos and doodles written as PNG files

use crate::domain::sanitize_location;
use crate::error::{DiaryError, Result};
use image::{DynamicImage, ImageFormat};
use std::borrow::Cow;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;
use walkdir::WalkDir;

/// What an asset depicts; decides the filename prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Photo attached to an entry
    Memory,
    /// Hand-drawn annotation
    Doodle,
}

impl AssetKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            AssetKind::Memory => "mem",
            AssetKind::Doodle => "doo",
        }
    }
}

/// Writes bitmaps under one directory and hands back their paths.
///
/// Returned paths are `asset_dir/<file>`: relative to the diary root when
/// `asset_dir` is relative, which keeps the JSON document portable.
#[derive(Debug, Clone)]
pub struct ImageAssetStore {
    root: PathBuf,
    asset_dir: PathBuf,
}

impl ImageAssetStore {
    pub fn new(root: PathBuf, asset_dir: PathBuf) -> Self {
        ImageAssetStore { root, asset_dir }
    }

    /// Directory the PNG files land in
    pub fn dir(&self) -> PathBuf {
        self.root.join(&self.asset_dir)
    }

    /// Turn a recorded asset path into one usable from the current process
    pub fn resolve(&self, recorded: &Path) -> PathBuf {
        self.root.join(recorded)
    }

    /// Build `{prefix}_{location}_{suffix}.png`
    pub fn asset_filename(kind: AssetKind, location_hint: &str) -> String {
        format!(
            "{}_{}_{}.png",
            kind.prefix(),
            sanitize_location(location_hint),
            Uuid::new_v4().simple()
        )
    }

    /// Persist `image` as PNG and return its recorded path.
    ///
    /// `None` is a no-op returning `Ok(None)`. The file is flushed and synced
    /// before returning; on failure no file written by this call is left behind.
    pub fn save_image(
        &self,
        image: Option<&DynamicImage>,
        kind: AssetKind,
        location_hint: &str,
    ) -> Result<Option<PathBuf>> {
        let Some(image) = image else {
            return Ok(None);
        };

        let dir = self.dir();
        fs::create_dir_all(&dir)?;

        let filename = Self::asset_filename(kind, location_hint);
        let full_path = dir.join(&filename);

        if let Err(e) = write_png(&full_path, image) {
            tracing::error!(path = %full_path.display(), error = %e, "failed to write image asset");
            return Err(e);
        }

        tracing::debug!(path = %full_path.display(), kind = kind.prefix(), "saved image asset");
        Ok(Some(self.asset_dir.join(filename)))
    }

    /// Recorded paths of every PNG under the asset directory, sorted
    pub fn list_assets(&self) -> Vec<PathBuf> {
        let dir = self.dir();
        let mut assets: Vec<PathBuf> = WalkDir::new(&dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
            })
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(&dir)
                    .ok()
                    .map(|rel| self.asset_dir.join(rel))
            })
            .collect();
        assets.sort();
        assets
    }
}

/// PNG cannot carry float samples; everything else encodes as-is
fn png_compatible(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image {
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8()))
        }
        _ => Cow::Borrowed(image),
    }
}

/// Create `path` (never an existing file) and encode `image` into it.
/// Only a file this call created is removed when encoding fails.
fn write_png(path: &Path, image: &DynamicImage) -> Result<()> {
    let file = OpenOptions::new().write(true).create_new(true).open(path)?;

    if let Err(e) = encode_png(file, image) {
        // Half-written and unreferenced
        let _ = fs::remove_file(path);
        return Err(e);
    }
    Ok(())
}

fn encode_png(file: File, image: &DynamicImage) -> Result<()> {
    let mut writer = BufWriter::new(file);

    png_compatible(image).write_to(&mut writer, ImageFormat::Png)?;
    writer.flush()?;

    let file: File = writer
        .into_inner()
        .map_err(|e| DiaryError::Io(e.into_error()))?;
    file.sync_all()?;
    Ok(())
}
