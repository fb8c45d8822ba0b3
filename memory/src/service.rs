use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::Result;
use crate::index::MemoryIndex;
use crate::index::filter_by_date;
use crate::media::MediaStore;
use crate::types::JournalStats;
use crate::types::MemoryRecord;
use crate::types::ResolvedMemory;

/// Save and list memories over a media store and an index.
pub struct MemoryService {
    media: Box<dyn MediaStore>,
    index: Box<dyn MemoryIndex>,
}

impl MemoryService {
    pub fn new(media: Box<dyn MediaStore>, index: Box<dyn MemoryIndex>) -> Self {
        Self { media, index }
    }

    /// Store the image, then append its row.
    ///
    /// The image write is not rolled back if the append fails; the file is
    /// left behind as an orphan.
    pub fn save_memory(
        &self,
        image_bytes: &[u8],
        filename: &str,
        capture_date: NaiveDate,
        caption: &str,
    ) -> Result<MemoryRecord> {
        self.media.put(filename, image_bytes)?;
        let record = MemoryRecord::new(filename, capture_date, caption);
        if let Err(e) = self.index.append(record.clone()) {
            tracing::warn!(filename, error = %e, "image stored but index append failed");
            return Err(e);
        }
        tracing::info!(filename, %capture_date, "saved memory");
        Ok(record)
    }

    /// All memories in index order, optionally restricted to one capture date.
    /// Records whose image is gone are kept with `media_path: None`.
    pub fn list_memories(&self, date_filter: Option<NaiveDate>) -> Result<Vec<ResolvedMemory>> {
        let mut records = self.index.load()?;
        if let Some(date) = date_filter {
            records = filter_by_date(records, date);
        }
        Ok(records
            .into_iter()
            .map(|record| {
                let media_path = self.media.locate(&record.image);
                if media_path.is_none() {
                    tracing::warn!(image = %record.image, "memory image is missing");
                }
                ResolvedMemory { record, media_path }
            })
            .collect())
    }

    /// Distinct capture dates, ascending.
    pub fn capture_dates(&self) -> Result<Vec<NaiveDate>> {
        let dates: BTreeSet<NaiveDate> = self
            .index
            .load()?
            .into_iter()
            .map(|r| r.capture_date)
            .collect();
        Ok(dates.into_iter().collect())
    }

    pub fn stats(&self) -> Result<JournalStats> {
        let resolved = self.list_memories(None)?;
        let dates: BTreeSet<NaiveDate> = resolved.iter().map(|m| m.record.capture_date).collect();
        let with_media = resolved.iter().filter(|m| m.has_media()).count();
        Ok(JournalStats {
            total: resolved.len(),
            with_media,
            missing_media: resolved.len() - with_media,
            distinct_dates: dates.len(),
            first_date: dates.first().copied(),
            last_date: dates.last().copied(),
        })
    }

    pub fn media(&self) -> &dyn MediaStore {
        self.media.as_ref()
    }
}
