//! Directory-backed store: one JSON file per key.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, StorageError};

use super::KeyValueStore;

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File path backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io {
                operation: "read",
                path,
                source: e,
            }),
        }
    }

    /// Writes `<key>.json.tmp`, syncs it and renames it over `<key>.json`.
    /// The temp file is removed when any step fails.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let temp_path = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir).map_err(|e| StorageError::Io {
            operation: "create directory",
            path: self.dir.clone(),
            source: e,
        })?;

        let replaced = write_synced(&temp_path, value).and_then(|()| {
            fs::rename(&temp_path, &path).map_err(|e| StorageError::AtomicWriteFailed {
                temp_path: temp_path.clone(),
                target_path: path.clone(),
                source: e,
            })
        });
        if replaced.is_err() {
            remove_leftover(&temp_path);
        }
        replaced?;

        tracing::trace!(path = %path.display(), bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io {
                operation: "delete",
                path,
                source: e,
            }),
        }
    }
}

fn write_synced(path: &Path, value: &str) -> Result<()> {
    let io_error = |operation: &'static str, source: std::io::Error| StorageError::Io {
        operation,
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(|e| io_error("create", e))?;
    file.write_all(value.as_bytes())
        .map_err(|e| io_error("write", e))?;
    file.sync_all().map_err(|e| io_error("sync", e))
}

fn remove_leftover(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "temp file left behind"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_get_remove() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("drafts"));

        assert_eq!(store.get("draft").unwrap(), None);

        store.set("draft", "{\"a\":1}").unwrap();
        assert_eq!(store.get("draft").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(dir.path().join("drafts/draft.json").exists());
        assert!(!dir.path().join("drafts/draft.json.tmp").exists());

        store.set("draft", "{}").unwrap();
        assert_eq!(store.get("draft").unwrap().as_deref(), Some("{}"));

        store.remove("draft").unwrap();
        assert_eq!(store.get("draft").unwrap(), None);
    }

    #[test]
    fn test_remove_absent_is_ok() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.remove("nothing").unwrap();
    }

    #[test]
    fn test_path_unsafe_keys_rejected() {
        let store = FileStore::new("/tmp");
        for key in ["", "../escape", "a/b", "dot.key"] {
            assert!(matches!(
                store.path_for(key),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn test_unwritable_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"file").unwrap();

        let store = FileStore::new(&blocker);
        let result = store.set("draft", "{}");
        assert!(matches!(result, Err(StorageError::Io { .. })));
    }

    #[test]
    fn test_failed_replace_removes_temp_file() {
        let dir = tempdir().unwrap();
        // A non-empty directory where the draft file should go.
        let occupied = dir.path().join("draft.json");
        fs::create_dir(&occupied).unwrap();
        fs::write(occupied.join("keep"), b"x").unwrap();

        let store = FileStore::new(dir.path());
        let result = store.set("draft", "{}");

        assert!(matches!(result, Err(StorageError::AtomicWriteFailed { .. })));
        assert!(!dir.path().join("draft.json.tmp").exists());
        assert!(occupied.join("keep").exists());
    }
}
