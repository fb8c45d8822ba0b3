use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Result;
use crate::error::StoreError;

/// Name of the optional config file inside the journal root.
pub const CONFIG_FILE: &str = "memento.toml";

pub const DEFAULT_INDEX_PATH: &str = "data/memories.csv";
pub const DEFAULT_MEDIA_DIR: &str = "images";
pub const DEFAULT_GRID_COLUMNS: usize = 3;
pub const MAX_GRID_COLUMNS: usize = 12;

/// Login pair checked by the presentation layer.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Contents of `memento.toml`. Relative paths resolve against the journal root.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct JournalConfig {
    pub index_path: Option<PathBuf>,
    pub media_dir: Option<PathBuf>,
    pub grid_columns: Option<usize>,
    pub credentials: Option<Credentials>,
}

impl JournalConfig {
    /// Read `<root>/memento.toml`; a missing file yields the defaults.
    pub fn from_root(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(StoreError::from_read(&path, e)),
        };
        Self::parse(&path, &text)
    }

    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| StoreError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Apply `MEMENTO_*` overrides read through `lookup`.
    ///
    /// Credentials are only replaced when both username and password are set.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(p) = lookup("MEMENTO_INDEX_PATH") {
            self.index_path = Some(PathBuf::from(p));
        }
        if let Some(p) = lookup("MEMENTO_MEDIA_DIR") {
            self.media_dir = Some(PathBuf::from(p));
        }
        if let (Some(username), Some(password)) =
            (lookup("MEMENTO_USERNAME"), lookup("MEMENTO_PASSWORD"))
        {
            self.credentials = Some(Credentials { username, password });
        }
        self
    }

    pub fn index_path(&self, root: &Path) -> PathBuf {
        root.join(self.index_path.as_deref().unwrap_or(Path::new(DEFAULT_INDEX_PATH)))
    }

    pub fn media_dir(&self, root: &Path) -> PathBuf {
        root.join(self.media_dir.as_deref().unwrap_or(Path::new(DEFAULT_MEDIA_DIR)))
    }

    /// Cards per dashboard row, between 1 and [`MAX_GRID_COLUMNS`].
    pub fn grid_columns(&self) -> usize {
        clamp_grid_columns(self.grid_columns.unwrap_or(DEFAULT_GRID_COLUMNS))
    }
}

pub fn clamp_grid_columns(columns: usize) -> usize {
    columns.clamp(1, MAX_GRID_COLUMNS)
}
