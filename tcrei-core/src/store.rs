//! # Key-value store
//!
//! The persistence boundary of the crate: a small, origin-scoped, synchronous
//! key-value string store. Repositories read and write whole serialized
//! collections through this interface and never touch the filesystem
//! directly, which makes an in-memory fake a drop-in substitute in tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid base path: {0}")]
    InvalidBasePath(String),
}

/// A synchronous key-value string store.
///
/// Every call is a single attempt; there are no retries. Failures are
/// reported as [`StoreError`] values and handled by the repository layer.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, or `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// An in-process store backed by a plain map.
///
/// Useful as a test substitute for the file-backed store and as an ephemeral
/// backend for throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
