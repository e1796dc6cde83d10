//! Raw string key-value stores.
//!
//! A [`KvStore`] plays the role browser storage plays for the storefront: a
//! flat map of string keys to string values, read and written synchronously.
//! Every successful write is broadcast as a [`StorageChange`] so other views
//! sharing the store can refresh. Delivery is best-effort; there is no
//! locking across writers and the last write wins.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;

use crate::CacheError;

/// Capacity of the change broadcast. Slow receivers observe `Lagged`.
const CHANGE_CAPACITY: usize = 64;

/// What happened to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Set,
    Removed,
}

/// Notification that a key was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageChange {
    /// The key that changed.
    pub key: String,
    /// Whether it was set or removed.
    pub kind: ChangeKind,
}

/// A synchronous string key-value store.
pub trait KvStore: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), CacheError>;

    /// All keys currently stored, sorted.
    fn keys(&self) -> Result<Vec<String>, CacheError>;

    /// Subscribe to writes made through this store.
    fn changes(&self) -> broadcast::Receiver<StorageChange>;
}

impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        (**self).keys()
    }

    fn changes(&self) -> broadcast::Receiver<StorageChange> {
        (**self).changes()
    }
}

/// Fan-out of [`StorageChange`] notifications.
#[derive(Debug, Clone)]
pub(crate) struct ChangeNotifier {
    sender: broadcast::Sender<StorageChange>,
}

impl ChangeNotifier {
    pub(crate) fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANGE_CAPACITY);
        Self { sender }
    }

    pub(crate) fn notify(&self, key: &str, kind: ChangeKind) {
        // No subscribers is fine.
        let _ = self.sender.send(StorageChange {
            key: key.to_string(),
            kind,
        });
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<StorageChange> {
        self.sender.subscribe()
    }
}

/// In-memory store. Share it between views with `Arc<MemoryStore>`.
#[derive(Debug)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    notifier: ChangeNotifier,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Create a store pre-populated with raw entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        if let Ok(mut map) = store.entries.write() {
            map.extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        }
        store
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let map = self.entries.read().map_err(|_| CacheError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        {
            let mut map = self.entries.write().map_err(|_| CacheError::Poisoned)?;
            map.insert(key.to_string(), value.to_string());
        }
        self.notifier.notify(key, ChangeKind::Set);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        let removed = {
            let mut map = self.entries.write().map_err(|_| CacheError::Poisoned)?;
            map.remove(key).is_some()
        };
        if removed {
            self.notifier.notify(key, ChangeKind::Removed);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let map = self.entries.read().map_err(|_| CacheError::Poisoned)?;
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn changes(&self) -> broadcast::Receiver<StorageChange> {
        self.notifier.subscribe()
    }
}
