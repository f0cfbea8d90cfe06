//! Error types for the travel diary

use thiserror::Error;

/// Main error type for the diary application
#[derive(Debug, Error)]
pub enum DiaryError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid placement: {0}")]
    InvalidPlacement(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Ambiguous entry id: {0}")]
    AmbiguousId(String),

    #[error("Font error: {0}")]
    Font(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("AI service error: {0}")]
    Service(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl DiaryError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DiaryError::InvalidDate(_)
            | DiaryError::InvalidPlacement(_)
            | DiaryError::InvalidInput(_)
            | DiaryError::AmbiguousId(_) => 2,
            DiaryError::EntryNotFound(_) => 3,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            DiaryError::InvalidDate(value) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Expected format: YYYY-MM-DD\n\
                    Example: diary add --date 2024-05-01 --location Kyoto --text \"...\"",
                    value
                )
            }
            DiaryError::InvalidPlacement(value) => {
                format!(
                    "Invalid placement: '{}'\n\n\
                    Valid placements:\n\
                    • top-left, top-right, bottom-left, bottom-right, center\n\
                    • Explicit pixel offset: X,Y (e.g., 40,120)",
                    value
                )
            }
            DiaryError::InvalidInput(msg) => {
                format!(
                    "Invalid input: {}\n\n\
                    Example: diary add --location Kyoto --text \"Saw cherry blossoms\"",
                    msg
                )
            }
            DiaryError::AmbiguousId(prefix) => {
                format!(
                    "Id prefix '{}' matches more than one entry\n\n\
                    Suggestions:\n\
                    • Type more characters of the id\n\
                    • Use 'diary list' to see entry ids",
                    prefix
                )
            }
            DiaryError::EntryNotFound(id) => {
                format!(
                    "Entry not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'diary list' to see entry ids\n\
                    • Check that DIARY_ROOT points at the right diary",
                    id
                )
            }
            DiaryError::Io(e) => {
                format!(
                    "Could not write to the diary: {}\n\n\
                    Suggestions:\n\
                    • Check permissions on the diary directory\n\
                    • Check that the disk is not full\n\
                    Previously saved entries were left untouched.",
                    e
                )
            }
            DiaryError::Service(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Set GROQ_API_KEY in your environment or a .env file\n\
                    • Check your network connection",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using DiaryError
pub type Result<T> = std::result::Result<T, DiaryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_suggestion() {
        let err = DiaryError::InvalidDate("01/05/2024".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("YYYY-MM-DD"));
        assert!(msg.contains("01/05/2024"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_invalid_placement_suggestion() {
        let err = DiaryError::InvalidPlacement("middle".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("top-left"));
        assert!(msg.contains("X,Y"));
    }

    #[test]
    fn test_entry_not_found_suggestion() {
        let err = DiaryError::EntryNotFound("abc".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("diary list"));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_ambiguous_id_suggestion() {
        let err = DiaryError::AmbiguousId("ab".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("'ab' matches more than one entry"));
        assert!(msg.contains("more characters"));
        assert!(!msg.contains("Configuration error"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_invalid_input_suggestion() {
        let err = DiaryError::InvalidInput("Location cannot be empty".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.starts_with("Invalid input: Location cannot be empty"));
        assert!(msg.contains("--location"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_io_error_mentions_untouched_entries() {
        let err = DiaryError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("permissions"));
        assert!(msg.contains("untouched"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = DiaryError::Config("bad value".to_string());
        let msg = err.display_with_suggestions();
        assert_eq!(msg, "Configuration error: bad value");
    }
}
