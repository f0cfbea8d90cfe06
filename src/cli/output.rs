//! Output formatting utilities

use crate::domain::DiaryEntry;
use pulldown_cmark::{Event, Parser as MdParser, Tag, TagEnd};

/// Format a list of entries, one line each
pub fn format_entry_list(entries: &[DiaryEntry]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        let mut line = format!("{}  {}  {}", short_id(&entry.id), entry.date, entry.location);
        if let Some(keyword) = &entry.keyword {
            line.push_str(&format!("  ({})", keyword));
        }
        if entry.has_memory() {
            line.push_str("  [photo]");
        }
        if entry.has_doodle() {
            line.push_str("  [doodle]");
        }
        output.push_str(&line);
        output.push('\n');
    }
    output
}

/// Format one entry with all of its fields
pub fn format_entry(entry: &DiaryEntry) -> String {
    let mut output = format!(
        "{} - {}\nid: {}\n",
        entry.date, entry.location, entry.id
    );
    if let Some(keyword) = &entry.keyword {
        output.push_str(&format!("keyword: {}\n", keyword));
    }
    match (&entry.memory_path, &entry.memory_title) {
        (Some(path), Some(title)) => {
            output.push_str(&format!("photo: {} ({})\n", path.display(), title))
        }
        (Some(path), None) => output.push_str(&format!("photo: {}\n", path.display())),
        (None, Some(title)) => output.push_str(&format!("title: {}\n", title)),
        (None, None) => {}
    }
    if let Some(path) = &entry.doodle_path {
        output.push_str(&format!("doodle: {}\n", path.display()));
    }
    if !entry.text.is_empty() {
        output.push('\n');
        output.push_str(&entry.text);
        output.push('\n');
    }
    output
}

/// First 8 characters of an id, enough to tell entries apart on screen
fn short_id(id: &str) -> &str {
    id.char_indices().nth(8).map_or(id, |(idx, _)| &id[..idx])
}

/// Flatten Markdown from the AI service into plain terminal text
pub fn markdown_to_text(markdown: &str) -> String {
    let mut output = String::new();
    // One counter per open list; None for bullet lists
    let mut lists: Vec<Option<u64>> = Vec::new();

    for event in MdParser::new(markdown) {
        match event {
            Event::Start(Tag::List(start)) => lists.push(start),
            Event::End(TagEnd::List(_)) => {
                lists.pop();
                if lists.is_empty() {
                    output.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                let depth = lists.len().saturating_sub(1);
                output.push_str(&"  ".repeat(depth));
                match lists.last_mut() {
                    Some(Some(n)) => {
                        output.push_str(&format!("{}. ", n));
                        *n += 1;
                    }
                    _ => output.push_str("• "),
                }
            }
            Event::End(TagEnd::Item) => {
                if !output.ends_with('\n') {
                    output.push('\n');
                }
            }
            Event::End(TagEnd::Heading(_)) => output.push_str("\n\n"),
            Event::End(TagEnd::Paragraph) => {
                if lists.is_empty() {
                    output.push_str("\n\n");
                } else {
                    output.push('\n');
                }
            }
            Event::Text(text) | Event::Code(text) => output.push_str(&text),
            Event::SoftBreak | Event::HardBreak => output.push('\n'),
            _ => {}
        }
    }

    output.trim_end().to_string()
}
