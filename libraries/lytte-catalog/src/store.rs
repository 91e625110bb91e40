//! Keyed JSON persistence
//!
//! One JSON file per key under a data directory. Values are rewritten in
//! full on every mutation; a file that fails to parse is discarded and
//! reinitialized to its default.

use lytte_core::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Durable key-value store over JSON files
///
/// Each key maps to `<dir>/<key>.json`. Reads tolerate missing and corrupt
/// files: both surface as "no value", and corrupt files are discarded so
/// the next write starts clean.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Load the value for `key`
    ///
    /// Returns `None` when the file is missing or fails to parse. A corrupt
    /// file is logged and removed, never fatal.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(Some(value)),
                Err(err) => {
                    warn!(key, %err, "discarding corrupt store entry");
                    let _ = fs::remove_file(&path);
                    Ok(None)
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Load the value for `key`, seeding with `default` when absent or corrupt
    ///
    /// The seeded value is written back so the next read sees it.
    pub fn load_or_seed<T, F>(&self, key: &str, default: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        if let Some(value) = self.load(key)? {
            return Ok(value);
        }
        let value = default();
        self.save(key, &value)?;
        Ok(value)
    }

    /// Write the value for `key`
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string_pretty(value)?;
        fs::write(self.path(key), raw)?;
        Ok(())
    }

    /// The directory backing this store
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
