//! Typed JSON access on top of a raw store.

use serde::{de::DeserializeOwned, Serialize};

use crate::store::KvStore;
use crate::CacheError;

/// A value that can reject itself after deserialization.
///
/// Used at the storage boundary: data that parses but breaks an invariant is
/// treated the same way as data that fails to parse.
pub trait Validate {
    /// Check the invariants, describing the first violation.
    fn validate(&self) -> Result<(), String>;
}

/// Type-safe cache over any [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: KvStore> Cache<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist and an error if it holds
    /// something that is not valid JSON for `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Vec<CartLine>> = cache.get("cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Get a value, falling back to `T::default()` when it is absent,
    /// unreadable or unparseable.
    pub fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "unreadable stored value, using default");
                T::default()
            }
        }
    }

    /// Like [`Cache::get_or_default`], additionally falling back when the
    /// parsed value fails validation.
    pub fn get_valid_or_default<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default + Validate,
    {
        let value: T = self.get_or_default(key);
        match value.validate() {
            Ok(()) => value,
            Err(reason) => {
                tracing::warn!(key, %reason, "stored value failed validation, using default");
                T::default()
            }
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.remove(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.store.get(key)?.is_some())
    }
}
