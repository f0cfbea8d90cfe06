//! In-progress entry built up by the caller before saving

use image::DynamicImage;

/// Unsaved user input plus any edited images.
///
/// The caller owns the draft between steps (attach a photo, stamp it,
/// classify a keyword) and hands it to the repository once to persist.
#[derive(Debug, Clone, Default)]
pub struct DraftEntry {
    pub date: String,
    pub location: String,
    pub text: String,
    pub memory: Option<DynamicImage>,
    pub doodle: Option<DynamicImage>,
    pub memory_title: Option<String>,
    pub keyword: Option<String>,
}

impl DraftEntry {
    pub fn new(
        date: impl Into<String>,
        location: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        DraftEntry {
            date: date.into(),
            location: location.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_memory(mut self, image: DynamicImage) -> Self {
        self.memory = Some(image);
        self
    }

    pub fn with_doodle(mut self, image: DynamicImage) -> Self {
        self.doodle = Some(image);
        self
    }

    /// Set the photo caption; blank captions are dropped
    pub fn with_memory_title(mut self, title: impl Into<String>) -> Self {
        self.memory_title = non_blank(title.into());
        self
    }

    /// Set the emotion keyword; blank keywords are dropped
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = non_blank(keyword.into());
        self
    }
}

/// Blank values become `None`; anything else is kept verbatim
fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
