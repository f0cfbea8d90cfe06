//! Record entry use case

use crate::domain::{
    apply_sticker, fit_width, load_image, stamp_text, DiaryEntry, DraftEntry, StickerPlacement,
};
use crate::error::Result;
use crate::infrastructure::{EntryRepository, StoryTeller};
use std::path::Path;

/// Sticker to stamp onto the photo before saving
#[derive(Debug, Clone, Copy)]
pub struct Sticker<'a> {
    pub path: &'a Path,
    pub placement: StickerPlacement,
}

/// Decorative text to draw onto the photo before saving
#[derive(Debug, Clone, Copy)]
pub struct TextStamp<'a> {
    pub text: &'a str,
    pub placement: StickerPlacement,
    /// Font file; the built-in font is used when absent or unusable
    pub font: Option<&'a Path>,
}

/// Service turning a draft into a stored entry
pub struct RecordEntryService<R: EntryRepository> {
    repository: R,
    photo_max_width: u32,
}

impl<R: EntryRepository> RecordEntryService<R> {
    pub fn new(repository: R, photo_max_width: u32) -> Self {
        RecordEntryService {
            repository,
            photo_max_width,
        }
    }

    /// Load the photo at `photo`, shrink it, stamp the optional sticker and
    /// then the optional text onto it, and attach the result to the draft.
    pub fn attach_photo(
        &self,
        draft: DraftEntry,
        photo: &Path,
        sticker: Option<Sticker<'_>>,
        text: Option<TextStamp<'_>>,
    ) -> Result<DraftEntry> {
        let mut image = fit_width(load_image(photo)?, self.photo_max_width);

        if let Some(sticker) = sticker {
            let stamp = load_image(sticker.path)?;
            image = apply_sticker(&image, &stamp, sticker.placement);
        }
        if let Some(stamp) = text {
            image = stamp_text(&image, stamp.text, stamp.placement, stamp.font)?;
        }

        Ok(draft.with_memory(image))
    }

    /// Attach a doodle image file to the draft, unchanged
    pub fn attach_doodle(&self, draft: DraftEntry, doodle: &Path) -> Result<DraftEntry> {
        Ok(draft.with_doodle(load_image(doodle)?))
    }

    /// Save the draft. When it carries no keyword and a teller is given, the
    /// notes are classified first; a failed classification only drops the keyword.
    pub fn execute(
        &self,
        mut draft: DraftEntry,
        teller: Option<&dyn StoryTeller>,
    ) -> Result<DiaryEntry> {
        if draft.keyword.is_none() && !draft.text.trim().is_empty() {
            if let Some(teller) = teller {
                match teller.classify_emotion(&draft.text) {
                    Ok(keyword) => draft.keyword = keyword,
                    Err(e) => tracing::warn!(error = %e, "emotion keyword unavailable"),
                }
            }
        }

        self.repository.save_entry(&draft)
    }
}
