//! Domain layer - Diary records, drafts and image editing

pub mod draft;
pub mod entry;
pub mod location;
pub mod photo;

pub use draft::DraftEntry;
pub use entry::DiaryEntry;
pub use location::sanitize_location;
pub use photo::{
    apply_sticker, fit_width, load_font, load_image, stamp_text, StampFont, StickerPlacement,
};
