//! File-backed [`KeyValueStore`].
//!
//! Each key is stored as one file inside the store directory. File names are
//! the percent-encoded key, so distinct keys never collide. Writes go to a
//! temporary sibling first and are renamed into place.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::warn;

use super::KeyValueStore;

/// Key-value store persisted as files in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", urlencoding::encode(key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read device storage entry");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let result = fs::write(&tmp, value).and_then(|()| fs::rename(&tmp, &path));
        if let Err(e) = result {
            warn!(key, error = %e, "Failed to write device storage entry");
        }
    }

    fn remove(&self, key: &str) {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(key, error = %e, "Failed to remove device storage entry"),
        }
    }
}
