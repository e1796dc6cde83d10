//! Key-value storage with typed JSON access for JSP Store.
//!
//! The storefront keeps all client state in flat string stores: the cart in a
//! long-lived local store and the last order summary in a session store.
//! This crate provides the store abstraction, two implementations and a
//! typed wrapper that treats bad data as absent.
//!
//! # Example
//!
//! ```rust,ignore
//! use jsp_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("cart", &lines)?;
//! let lines: Vec<CartLine> = cache.get_or_default("cart");
//! ```

mod error;
mod file;
mod kv;
mod store;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, Validate};
pub use store::{ChangeKind, KvStore, MemoryStore, StorageChange};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore, StorageChange, Validate};
}
