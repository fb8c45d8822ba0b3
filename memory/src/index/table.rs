use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::LazyLock;
use std::sync::Mutex;
use std::sync::PoisonError;

use super::MemoryIndex;
use crate::error::Result;
use crate::error::StoreError;
use crate::types::MemoryRecord;
use crate::types::format_date;
use crate::types::parse_date;

/// Column names of the table file, in order.
pub const HEADER: [&str; 3] = ["Image", "Date", "Caption"];

/// One append lock per table path, shared by every handle in the process.
static TABLE_LOCKS: LazyLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> =
    LazyLock::new(Default::default);

/// Directory holding the table file; a bare file name lives in `.`.
fn table_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Lock for the table at `path`, keyed by its canonical location so that
/// aliases such as `a/../data/memories.csv` share one mutex. Creates the
/// table directory, which must exist to be canonicalized.
fn table_lock(path: &Path) -> Result<Arc<Mutex<()>>> {
    let dir = table_dir(path);
    std::fs::create_dir_all(&dir).map_err(|e| StoreError::write_failure(&dir, e))?;
    let dir = std::fs::canonicalize(&dir).map_err(|e| StoreError::from_read(&dir, e))?;
    let key = match path.file_name() {
        Some(name) => dir.join(name),
        None => dir,
    };
    let mut locks = TABLE_LOCKS.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(Arc::clone(locks.entry(key).or_default()))
}

/// Mode for a table file created by the first append.
#[cfg(unix)]
fn new_table_permissions() -> std::fs::Permissions {
    use std::os::unix::fs::PermissionsExt;
    std::fs::Permissions::from_mode(0o644)
}

/// CSV-backed memory index (`Image,Date,Caption`).
///
/// Every append rewrites the whole table through a temp file in the same
/// directory, then renames it over the old one. The replacement keeps the
/// permissions of the file it replaces.
#[derive(Debug, Clone)]
pub struct CsvMemoryIndex {
    path: PathBuf,
}

impl CsvMemoryIndex {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<Vec<MemoryRecord>> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) => {
                let err = StoreError::from_read(&self.path, e);
                if err.is_not_found() {
                    return Ok(Vec::new());
                }
                return Err(err);
            }
        };
        parse_table(&self.path, &data)
    }

    fn write_table(&self, records: &[MemoryRecord]) -> Result<()> {
        let dir = table_dir(&self.path);
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::write_failure(&dir, e))?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)
            .map_err(|e| StoreError::write_failure(&dir, e))?;

        let fail = |e: csv::Error| StoreError::write_failure(&self.path, e.into());
        {
            let mut writer = csv::WriterBuilder::new()
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(tmp.as_file_mut());
            writer.write_record(HEADER).map_err(fail)?;
            for record in records {
                let date = format_date(record.capture_date);
                writer
                    .write_record([record.image.as_str(), date.as_str(), record.caption.as_str()])
                    .map_err(fail)?;
            }
            writer
                .flush()
                .map_err(|e| StoreError::write_failure(&self.path, e))?;
        }

        let permissions = match std::fs::metadata(&self.path) {
            Ok(meta) => Some(meta.permissions()),
            #[cfg(unix)]
            Err(_) => Some(new_table_permissions()),
            #[cfg(not(unix))]
            Err(_) => None,
        };
        if let Some(permissions) = permissions {
            tmp.as_file()
                .set_permissions(permissions)
                .map_err(|e| StoreError::write_failure(tmp.path(), e))?;
        }

        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::write_failure(&self.path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::write_failure(&self.path, e.error))?;
        Ok(())
    }
}

impl MemoryIndex for CsvMemoryIndex {
    fn load(&self) -> Result<Vec<MemoryRecord>> {
        match self.read_table() {
            Err(StoreError::MalformedTable { path, reason }) => {
                tracing::warn!(path = %path.display(), %reason, "memory table is malformed; reading it as empty");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    fn append(&self, record: MemoryRecord) -> Result<()> {
        let lock = table_lock(&self.path)?;
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        // A malformed table is reported here rather than overwritten.
        let mut records = self.read_table()?;
        records.push(record);
        self.write_table(&records)?;
        tracing::debug!(path = %self.path.display(), rows = records.len(), "rewrote memory table");
        Ok(())
    }
}

/// Parse the table file contents.
///
/// Accepts files written without quoting: a caption that contained commas
/// arrives as extra fields and is joined back together, and a row without a
/// caption field reads as an empty caption.
pub fn parse_table(path: &Path, data: &[u8]) -> Result<Vec<MemoryRecord>> {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| StoreError::malformed(path, e))?;
    if !headers.iter().eq(HEADER) {
        let found = headers.iter().collect::<Vec<_>>().join(",");
        return Err(StoreError::malformed(
            path,
            format!("expected header Image,Date,Caption, found {found}"),
        ));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| StoreError::malformed(path, e))?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let (Some(image), Some(date)) = (row.get(0), row.get(1)) else {
            return Err(StoreError::malformed(
                path,
                format!("line {line}: expected at least 2 fields, found {}", row.len()),
            ));
        };
        if image.is_empty() {
            return Err(StoreError::malformed(path, format!("line {line}: empty Image")));
        }
        let capture_date = parse_date(date).map_err(|e| {
            StoreError::malformed(path, format!("line {line}: bad Date {date:?}: {e}"))
        })?;
        let caption = row.iter().skip(2).collect::<Vec<_>>().join(",");
        records.push(MemoryRecord {
            image: image.to_string(),
            capture_date,
            caption,
        });
    }
    Ok(records)
}
