use std::path::Path;

use crate::config::JournalConfig;
use crate::error::Result;
use crate::index::table::CsvMemoryIndex;
use crate::media::DirMediaStore;
use crate::service::MemoryService;

/// Load `<root>/memento.toml` and apply `MEMENTO_*` environment overrides:
/// - `MEMENTO_INDEX_PATH` for the CSV table
/// - `MEMENTO_MEDIA_DIR` for the image directory
/// - `MEMENTO_USERNAME` + `MEMENTO_PASSWORD` for the login pair
pub fn load_config(root: &Path) -> Result<JournalConfig> {
    Ok(JournalConfig::from_root(root)?.with_env(|key| std::env::var(key).ok()))
}

/// Build a journal rooted at `root`: `<root>/data/memories.csv` and
/// `<root>/images/` unless the config says otherwise.
pub fn open_journal(root: &Path, config: &JournalConfig) -> MemoryService {
    let index_path = config.index_path(root);
    let media_dir = config.media_dir(root);
    tracing::debug!(
        index = %index_path.display(),
        media = %media_dir.display(),
        "opening journal"
    );
    MemoryService::new(
        Box::new(DirMediaStore::new(media_dir)),
        Box::new(CsvMemoryIndex::new(index_path)),
    )
}
