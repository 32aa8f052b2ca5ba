// ── Key-value blob storage ──
//
// A named string slot per key. The file backend keeps one `<key>.json`
// per key under a data directory; writes go through a sibling temp file
// and a rename so a crash never leaves a truncated blob behind.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::trace;

use crate::error::CoreError;

/// Synchronous string storage keyed by name.
pub trait BlobStore: Send + Sync {
    /// `Ok(None)` when nothing is stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), CoreError>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

fn persistence(key: &str, err: impl std::fmt::Display) -> CoreError {
    CoreError::Persistence {
        key: key.to_owned(),
        reason: err.to_string(),
    }
}

// ── File backend ───────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(persistence(key, e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| persistence(key, e))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| persistence(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| persistence(key, e))?;

        trace!(path = %path.display(), bytes = value.len(), "blob written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(persistence(key, e)),
        }
    }
}

// ── In-memory backend ──────────────────────────────────────────────

/// Process-local storage, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        store
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, CoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path().join("nested"));

        assert_eq!(store.read("myPlans").unwrap(), None);
        store.write("myPlans", "[]").unwrap();
        assert_eq!(store.read("myPlans").unwrap().as_deref(), Some("[]"));
        assert!(store.path_for("myPlans").exists());
        assert!(!store.path_for("myPlans").with_extension("json.tmp").exists());

        store.remove("myPlans").unwrap();
        assert_eq!(store.read("myPlans").unwrap(), None);
        store.remove("myPlans").unwrap();
    }

    #[test]
    fn file_store_reports_unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let store = FileBlobStore::new(&blocker);
        let err = store.write("myPlans", "[]").unwrap_err();
        assert!(matches!(err, CoreError::Persistence { ref key, .. } if key == "myPlans"));
    }

    #[test]
    fn memory_store_behaves_like_a_map() {
        let store = MemoryBlobStore::with_entry("a", "1");
        assert_eq!(store.read("a").unwrap().as_deref(), Some("1"));
        store.remove("a").unwrap();
        assert_eq!(store.read("a").unwrap(), None);
    }
}
