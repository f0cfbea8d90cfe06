//! Diary entry record as stored in the backing document

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// One recorded trip memory.
///
/// Field order here is the key order written to the JSON document.
/// Only `id`, `date`, `location` and `text` are required when reading;
/// entries written by older versions may lack the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: String,
    pub date: String,
    pub location: String,
    pub text: String,
    #[serde(default)]
    pub memory_title: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub memory_path: Option<PathBuf>,
    #[serde(default)]
    pub doodle_path: Option<PathBuf>,
}

impl DiaryEntry {
    /// Generate a fresh entry identifier
    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Whether a photo asset is attached
    pub fn has_memory(&self) -> bool {
        self.memory_path.is_some()
    }

    /// Whether a doodle asset is attached
    pub fn has_doodle(&self) -> bool {
        self.doodle_path.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_distinct() {
        let a = DiaryEntry::new_id();
        let b = DiaryEntry::new_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn test_reads_legacy_entry_without_optional_fields() {
        let json = r#"{"id": "1", "date": "2023-08-10", "location": "Lisboa", "text": "Tranvía 28"}"#;
        let entry: DiaryEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.location, "Lisboa");
        assert_eq!(entry.memory_title, None);
        assert_eq!(entry.keyword, None);
        assert!(!entry.has_memory());
        assert!(!entry.has_doodle());
    }

    #[test]
    fn test_reads_null_optional_fields() {
        let json = r#"{
            "id": "2",
            "date": "2024-05-01",
            "location": "Kyoto",
            "text": "Saw cherry blossoms",
            "memory_title": null,
            "keyword": "Calma",
            "memory_path": "data/images/mem_Kyoto_ab.png",
            "doodle_path": null
        }"#;
        let entry: DiaryEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.keyword.as_deref(), Some("Calma"));
        assert_eq!(
            entry.memory_path,
            Some(PathBuf::from("data/images/mem_Kyoto_ab.png"))
        );
        assert_eq!(entry.doodle_path, None);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let json = r#"{"id": "3", "date": "2024-05-01", "text": "no location"}"#;
        assert!(serde_json::from_str::<DiaryEntry>(json).is_err());
    }

    #[test]
    fn test_serializes_keys_in_declared_order() {
        let entry = DiaryEntry {
            id: "x".to_string(),
            date: "2024-05-01".to_string(),
            location: "Kyoto".to_string(),
            text: "t".to_string(),
            memory_title: None,
            keyword: None,
            memory_path: None,
            doodle_path: None,
        };
        let json = serde_json::to_string(&entry).unwrap();
        let keys = [
            "\"id\"",
            "\"date\"",
            "\"location\"",
            "\"text\"",
            "\"memory_title\"",
            "\"keyword\"",
            "\"memory_path\"",
            "\"doodle_path\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
