//! JSON-file backed store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tokio::sync::broadcast;

use crate::store::{ChangeKind, ChangeNotifier, KvStore, StorageChange};
use crate::CacheError;

/// Store persisted as a single JSON object of string values.
///
/// The file is re-read on every access and rewritten in full on every write,
/// so several processes pointed at the same file see each other's writes.
/// Writes go through a temporary sibling file and a rename.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
    notifier: ChangeNotifier,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// The parent directory is created if it does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    CacheError::OpenError(format!("{}: {}", parent.display(), e))
                })?;
            }
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
            notifier: ChangeNotifier::new(),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, CacheError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content)
            .map_err(|e| CacheError::Corrupt(format!("{}: {}", self.path.display(), e)))
    }

    /// Read the map for a write, starting over if the file is unreadable JSON.
    fn read_map_for_write(&self) -> Result<BTreeMap<String, String>, CacheError> {
        match self.read_map() {
            Err(CacheError::Corrupt(reason)) => {
                tracing::warn!(%reason, "discarding corrupt store file");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), CacheError> {
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(map)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        {
            let _guard = self.write_lock.lock().map_err(|_| CacheError::Poisoned)?;
            let mut map = self.read_map_for_write()?;
            map.insert(key.to_string(), value.to_string());
            self.write_map(&map)?;
        }
        self.notifier.notify(key, ChangeKind::Set);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        let removed = {
            let _guard = self.write_lock.lock().map_err(|_| CacheError::Poisoned)?;
            let mut map = self.read_map_for_write()?;
            let removed = map.remove(key).is_some();
            if removed {
                self.write_map(&map)?;
            }
            removed
        };
        if removed {
            self.notifier.notify(key, ChangeKind::Removed);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.read_map()?.into_keys().collect())
    }

    fn changes(&self) -> broadcast::Receiver<StorageChange> {
        self.notifier.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("local.json")).unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_persists_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("local.json");

        let first = FileStore::open(&path).unwrap();
        first.set("cart", r#"[{"name":"X","price":1,"amount":1}]"#).unwrap();

        let second = FileStore::open(&path).unwrap();
        assert_eq!(
            second.get("cart").unwrap().as_deref(),
            Some(r#"[{"name":"X","price":1,"amount":1}]"#)
        );

        second.remove("cart").unwrap();
        assert_eq!(first.get("cart").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_errors_on_read_and_recovers_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(matches!(store.get("cart"), Err(CacheError::Corrupt(_))));

        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_write_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("local.json")).unwrap();
        let mut rx = store.changes();

        store.set("orderSummary", "{}").unwrap();
        assert_eq!(rx.try_recv().unwrap().key, "orderSummary");
    }
}
