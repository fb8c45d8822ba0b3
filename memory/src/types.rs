use std::path::PathBuf;

use chrono::NaiveDate;

/// Canonical on-disk form of a capture date (ISO-8601 calendar date).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render a date in its canonical form.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a date in its canonical form, tolerating surrounding whitespace.
pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
}

/// One journal entry. Identity is the row position in the index.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MemoryRecord {
    pub image: String,
    pub capture_date: NaiveDate,
    pub caption: String,
}

impl MemoryRecord {
    pub fn new(image: impl Into<String>, capture_date: NaiveDate, caption: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            capture_date,
            caption: caption.into(),
        }
    }
}

/// A record paired with the location of its image, if the image still exists.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ResolvedMemory {
    pub record: MemoryRecord,
    pub media_path: Option<PathBuf>,
}

impl ResolvedMemory {
    pub fn has_media(&self) -> bool {
        self.media_path.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct JournalStats {
    pub total: usize,
    pub with_media: usize,
    pub missing_media: usize,
    pub distinct_dates: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}
