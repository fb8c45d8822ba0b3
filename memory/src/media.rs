use std::path::Path;
use std::path::PathBuf;

use crate::error::Result;
use crate::error::StoreError;

/// Image blobs addressed by their original upload filename.
pub trait MediaStore: Send + Sync {
    /// Write `bytes` under `filename`, replacing any existing file.
    fn put(&self, filename: &str, bytes: &[u8]) -> Result<()>;
    fn exists(&self, filename: &str) -> bool;
    fn read(&self, filename: &str) -> Result<Vec<u8>>;
    /// Path of the stored file, or `None` when it is absent.
    fn locate(&self, filename: &str) -> Option<PathBuf>;
}

/// Flat directory of image files.
#[derive(Debug, Clone)]
pub struct DirMediaStore {
    dir: PathBuf,
}

impl DirMediaStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, filename: &str) -> Result<PathBuf> {
        validate_filename(filename)?;
        Ok(self.dir.join(filename))
    }
}

/// A media filename must be exactly one normal path component.
pub fn validate_filename(filename: &str) -> Result<()> {
    let mut components = Path::new(filename).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    );
    if !single_normal || filename.contains(['/', '\\']) {
        return Err(StoreError::InvalidFilename(filename.to_string()));
    }
    Ok(())
}

impl MediaStore for DirMediaStore {
    fn put(&self, filename: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(filename)?;
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| StoreError::write_failure(&self.dir, e))?;
        std::fs::write(&path, bytes).map_err(|e| StoreError::write_failure(&path, e))?;
        tracing::debug!(path = %path.display(), len = bytes.len(), "stored media");
        Ok(())
    }

    fn exists(&self, filename: &str) -> bool {
        self.locate(filename).is_some()
    }

    fn read(&self, filename: &str) -> Result<Vec<u8>> {
        let path = self.path_for(filename)?;
        std::fs::read(&path).map_err(|e| StoreError::from_read(&path, e))
    }

    fn locate(&self, filename: &str) -> Option<PathBuf> {
        let path = self.path_for(filename).ok()?;
        path.is_file().then_some(path)
    }
}
