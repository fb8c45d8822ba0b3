use chrono::NaiveDate;

use crate::error::Result;
use crate::types::MemoryRecord;
use crate::types::format_date;

/// Ordered, append-only table of memory records.
pub trait MemoryIndex: Send + Sync {
    /// Read the full table. An absent or empty table is an empty vec.
    fn load(&self) -> Result<Vec<MemoryRecord>>;
    /// Append one record at the end of the table.
    fn append(&self, record: MemoryRecord) -> Result<()>;
}

/// Keep the records whose capture date serializes identically to `date`.
pub fn filter_by_date(records: Vec<MemoryRecord>, date: NaiveDate) -> Vec<MemoryRecord> {
    let wanted = format_date(date);
    records
        .into_iter()
        .filter(|r| format_date(r.capture_date) == wanted)
        .collect()
}

pub mod table;
