//! # Post Format
//!
//! How a post looks on disk, and the caller-side checks that run before
//! anything is written.
//!
//! ```text
//! Title: <title>
//! Category: <category>
//! Tags: <tags>
//! Content:
//! <content>
//!
//! [Date: 2024-01-02 10:00:00]      ← one block per append
//! <content>
//! ```
//!
//! The filename is the title with spaces turned into underscores, plus `.txt`.

use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const POST_EXTENSION: &str = ".txt";
pub const CONTENT_TYPE: &str = "text/plain";

const TITLE_PREFIX: &str = "Title: ";
const CATEGORY_PREFIX: &str = "Category: ";
const TAGS_PREFIX: &str = "Tags: ";
const CONTENT_MARKER: &str = "Content:";

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Derive the storage filename for a title: `"Hello World"` → `"Hello_World.txt"`.
pub fn filename_for_title(title: &str) -> String {
    format!("{}{}", title.replace(' ', "_"), POST_EXTENSION)
}

/// Recover a display title from a filename: `"My_Trip.txt"` → `"My Trip"`.
pub fn title_from_filename(filename: &str) -> String {
    filename
        .strip_suffix(POST_EXTENSION)
        .unwrap_or(filename)
        .replace('_', " ")
}

// ============================================================================
// Stamp
// ============================================================================

/// Local date and time attached to an appended entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stamp(NaiveDateTime);

impl Stamp {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self(NaiveDateTime::new(date, time))
    }

    /// The local wall clock, truncated to whole seconds.
    pub fn now() -> Self {
        let now = Local::now().naive_local();
        Self(now.with_nanosecond(0).unwrap_or(now))
    }

    /// Parse separate `YYYY-MM-DD` and `HH:MM:SS` strings.
    pub fn parse(date: &str, time: &str) -> Result<Self, chrono::ParseError> {
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)?;
        let time = NaiveTime::parse_from_str(time, TIME_FORMAT)?;
        Ok(Self::new(date, time))
    }

    /// Parse a combined `YYYY-MM-DD HH:MM:SS` string.
    pub fn parse_combined(s: &str) -> Result<Self, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s.trim(), &format!("{DATE_FORMAT} {TIME_FORMAT}")).map(Self)
    }

    pub fn date(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }

    pub fn time(&self) -> String {
        self.0.format(TIME_FORMAT).to_string()
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date(), self.time())
    }
}

// ============================================================================
// Drafts and validation
// ============================================================================

/// Form data for a new post. Checked with [`Draft::validate`] before the
/// store sees it; the store itself never validates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub category: String,
    pub tags: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    MissingFields,
    EmptyContent,
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::MissingFields => {
                write!(f, "Please provide a title, category, tags, and content.")
            }
            DraftError::EmptyContent => write!(f, "Content cannot be empty."),
        }
    }
}

impl std::error::Error for DraftError {}

impl Draft {
    pub fn filename(&self) -> String {
        filename_for_title(&self.title)
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        let fields = [&self.title, &self.category, &self.tags, &self.content];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(DraftError::MissingFields);
        }
        Ok(())
    }
}

/// Check the text of an entry about to be appended.
pub fn validate_entry(content: &str) -> Result<(), DraftError> {
    if content.trim().is_empty() {
        Err(DraftError::EmptyContent)
    } else {
        Ok(())
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// The full document written when a post is created.
pub fn render_document(draft: &Draft) -> String {
    format!(
        "{TITLE_PREFIX}{}\n{CATEGORY_PREFIX}{}\n{TAGS_PREFIX}{}\n{CONTENT_MARKER}\n{}\n",
        draft.title, draft.category, draft.tags, draft.content
    )
}

/// One appended block. The leading blank line separates it from whatever
/// came before.
pub fn render_entry(content: &str, stamp: &Stamp) -> String {
    format!("\n\n[Date: {stamp}]\n{content}\n")
}

// ============================================================================
// Parsing (display only)
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostHeader {
    pub title: String,
    pub category: String,
    pub tags: String,
}

impl PostHeader {
    /// Read the header lines back out of a document. Absent lines leave the
    /// field empty, so header-less files still display.
    pub fn parse(document: &str) -> Self {
        let mut header = PostHeader::default();
        for line in document.lines().take(3) {
            if let Some(v) = line.strip_prefix(TITLE_PREFIX) {
                header.title = v.to_string();
            } else if let Some(v) = line.strip_prefix(CATEGORY_PREFIX) {
                header.category = v.to_string();
            } else if let Some(v) = line.strip_prefix(TAGS_PREFIX) {
                header.tags = v.to_string();
            }
        }
        header
    }

    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Everything after the `Content:` line, or the whole document if there is none.
pub fn body(document: &str) -> &str {
    let mut offset = 0;
    for line in document.split_inclusive('\n') {
        offset += line.len();
        if line.trim_end_matches(['\r', '\n']) == CONTENT_MARKER {
            return &document[offset..];
        }
    }
    document
}

/// Whether a line is an appended-entry stamp (`[Date: ...]`).
pub fn is_stamp_line(line: &str) -> bool {
    line.starts_with("[Date: ") && line.ends_with(']')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip() -> Draft {
        Draft {
            title: "Trip".to_string(),
            category: "Lifestyle".to_string(),
            tags: "travel".to_string(),
            content: "Day 1".to_string(),
        }
    }

    #[test]
    fn test_filename_replaces_spaces() {
        assert_eq!(filename_for_title("Hello World"), "Hello_World.txt");
        assert_eq!(filename_for_title("a  b"), "a__b.txt");
        assert_eq!(filename_for_title("Trip"), "Trip.txt");
    }

    #[test]
    fn test_title_from_filename() {
        assert_eq!(title_from_filename("My_Trip.txt"), "My Trip");
        assert_eq!(title_from_filename("notes"), "notes");
    }

    #[test]
    fn test_render_document_field_order() {
        assert_eq!(
            render_document(&trip()),
            "Title: Trip\nCategory: Lifestyle\nTags: travel\nContent:\nDay 1\n"
        );
    }

    #[test]
    fn test_render_entry() {
        let stamp = Stamp::parse("2024-01-02", "10:00:00").unwrap();
        assert_eq!(
            render_entry("Day 2", &stamp),
            "\n\n[Date: 2024-01-02 10:00:00]\nDay 2\n"
        );
    }

    #[test]
    fn test_stamp_parse_and_display() {
        let stamp = Stamp::parse_combined("2024-01-02 10:00:00").unwrap();
        assert_eq!(stamp.date(), "2024-01-02");
        assert_eq!(stamp.time(), "10:00:00");
        assert_eq!(stamp.to_string(), "2024-01-02 10:00:00");
        assert!(Stamp::parse("2024-13-01", "10:00:00").is_err());
        assert!(Stamp::parse_combined("yesterday").is_err());
    }

    #[test]
    fn test_stamp_now_has_whole_seconds() {
        let s = Stamp::now().to_string();
        assert_eq!(s.len(), "2024-01-02 10:00:00".len());
    }

    #[test]
    fn test_draft_validation() {
        assert!(trip().validate().is_ok());

        let mut missing_tags = trip();
        missing_tags.tags = "  ".to_string();
        assert_eq!(missing_tags.validate(), Err(DraftError::MissingFields));

        assert_eq!(Draft::default().validate(), Err(DraftError::MissingFields));
    }

    #[test]
    fn test_validate_entry() {
        assert!(validate_entry("hello").is_ok());
        assert_eq!(validate_entry(""), Err(DraftError::EmptyContent));
        assert_eq!(validate_entry("\n \n"), Err(DraftError::EmptyContent));
        assert_eq!(
            DraftError::EmptyContent.to_string(),
            "Content cannot be empty."
        );
    }

    #[test]
    fn test_header_parse() {
        let doc = render_document(&Draft {
            tags: "travel, food".to_string(),
            ..trip()
        });
        let header = PostHeader::parse(&doc);
        assert_eq!(header.title, "Trip");
        assert_eq!(header.category, "Lifestyle");
        assert_eq!(header.tag_list(), vec!["travel", "food"]);
    }

    #[test]
    fn test_header_parse_headerless() {
        let header = PostHeader::parse("\n\n[Date: 2024-01-02 10:00:00]\nstray\n");
        assert_eq!(header, PostHeader::default());
    }

    #[test]
    fn test_body_after_content_marker() {
        let doc = "Title: T\nCategory: C\nTags: g\nContent:\nline one\nline two\n";
        assert_eq!(body(doc), "line one\nline two\n");
        assert_eq!(body("no marker"), "no marker");
    }

    #[test]
    fn test_is_stamp_line() {
        assert!(is_stamp_line("[Date: 2024-01-02 10:00:00]"));
        assert!(!is_stamp_line("Date: 2024-01-02"));
    }
}
