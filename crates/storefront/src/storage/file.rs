//! File-backed storage: `<dir>/<key>.json`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{KeyValueStore, StorageError, validate_key};

/// Stores each key as a file in a directory.
///
/// Writes go to `<key>.json.tmp` first and are renamed into place, so readers
/// never observe a half-written blob.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(key: &str, source: io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| io_error(key, e))?;

        let tmp = path.with_extension("json.tmp");
        let written = fs::File::create(&tmp)
            .and_then(|mut file| {
                file.write_all(value.as_bytes())?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&tmp, &path));
        if let Err(e) = written {
            match fs::remove_file(&tmp) {
                Err(cleanup) if cleanup.kind() != io::ErrorKind::NotFound => {
                    warn!(
                        key,
                        error = %cleanup,
                        path = %tmp.display(),
                        "Failed to remove temp file"
                    );
                }
                _ => {}
            }
            return Err(io_error(key, e));
        }

        debug!(key, bytes = value.len(), path = %path.display(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_missing_key_reads_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[test]
    fn test_set_get_overwrite_remove() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("data");
        let store = FileStore::new(&dir);

        store.set("cart", r#"{"items":[]}"#).unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some(r#"{"items":[]}"#));
        assert!(dir.join("cart.json").exists());
        assert!(!dir.join("cart.json.tmp").exists());

        store.set("cart", "second").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("second"));

        store.remove("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
        store.remove("cart").unwrap();
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let occupied = dir.path().join("cart.json");
        fs::create_dir(&occupied).unwrap();
        fs::write(occupied.join("keep"), "x").unwrap();

        let store = FileStore::new(dir.path());
        assert!(matches!(store.set("cart", "blob"), Err(StorageError::Io { .. })));
        assert!(!dir.path().join("cart.json.tmp").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.set("../cart", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_unwritable_dir_reports_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let store = FileStore::new(blocker.join("nested"));
        assert!(matches!(store.set("cart", "x"), Err(StorageError::Io { .. })));
    }
}
