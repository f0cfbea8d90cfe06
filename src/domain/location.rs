//! Location text to filename fragment

use regex::Regex;
use std::sync::OnceLock;

/// Runs of whitespace collapse to one underscore
fn whitespace_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Anything that is not a letter, digit, dash or underscore
fn unsafe_char_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[^\p{L}\p{N}_-]").unwrap())
}

/// Turn a free-text place name into a fragment safe to embed in a filename.
///
/// Path separators, dots and other punctuation become `_`, so the result
/// can never escape the asset directory.
pub fn sanitize_location(location: &str) -> String {
    let spaced = whitespace_regex().replace_all(location.trim(), "_");
    let safe = unsafe_char_regex().replace_all(&spaced, "_");

    if safe.is_empty() {
        "untitled".to_string()
    } else {
        safe.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_unchanged() {
        assert_eq!(sanitize_location("Kyoto"), "Kyoto");
    }

    #[test]
    fn test_whitespace_becomes_underscore() {
        assert_eq!(sanitize_location("New York"), "New_York");
        assert_eq!(sanitize_location("Rio  de\tJaneiro"), "Rio_de_Janeiro");
    }

    #[test]
    fn test_non_ascii_letters_kept() {
        assert_eq!(sanitize_location("São Paulo"), "São_Paulo");
        assert_eq!(sanitize_location("東京"), "東京");
    }

    #[test]
    fn test_path_traversal_neutralized() {
        let safe = sanitize_location("../../etc/passwd");
        assert!(!safe.contains('/'));
        assert!(!safe.contains(".."));
        assert_eq!(safe, "______etc_passwd");
    }

    #[test]
    fn test_backslash_and_colon_replaced() {
        assert_eq!(sanitize_location(r"C:\temp"), "C__temp");
    }

    #[test]
    fn test_empty_location_falls_back() {
        assert_eq!(sanitize_location(""), "untitled");
        assert_eq!(sanitize_location("   "), "untitled");
    }
}
