//! # File store
//!
//! A [`KeyValueStore`] backed by the local filesystem: each key maps to one
//! `{key}.json` file under a base directory. This is the durable analog of a
//! browser's origin-scoped storage; reads and writes are synchronous and
//! happen in a single attempt.

use crate::store::{KeyValueStore, StoreError};
use std::fs::{self, create_dir_all};
use std::io;
use std::path::PathBuf;

/// A key-value store that keeps one file per key in a base directory.
pub struct FileStore {
    /// The directory where the per-key files live.
    pub base_path: PathBuf,
}

impl FileStore {
    pub fn new(base_path: impl Into<PathBuf>) -> FileStore {
        FileStore {
            base_path: base_path.into(),
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.json"))
    }

    fn ensure_base_directory_exists(&self) -> Result<(), StoreError> {
        if !self.base_path.exists() {
            create_dir_all(&self.base_path)?;
        } else if !self.base_path.is_dir() {
            return Err(StoreError::InvalidBasePath(
                self.base_path.display().to_string(),
            ));
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    /// Reads the file for `key`. A missing file is `Ok(None)`, not an error.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes the file for `key`, creating the base directory on demand and
    /// overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.ensure_base_directory_exists()?;
        fs::write(self.key_path(key), value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_absent_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        assert_eq!(store.get("saved_prompts").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.set("saved_prompts", "[]").unwrap();
        assert_eq!(store.get("saved_prompts").unwrap().as_deref(), Some("[]"));

        // One file per key, under the expected name
        assert!(temp_dir.path().join("saved_prompts.json").exists());
    }

    #[test]
    fn test_set_creates_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("data");
        let store = FileStore::new(&nested);

        assert!(!nested.exists());
        store.set("saved_chats", "[]").unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_set_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.set("key", "first").unwrap();
        store.set("key", "second").unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_set_fails_when_base_path_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("not_a_directory");
        fs::write(&file_path, "some content").unwrap();

        let store = FileStore::new(&file_path);
        let result = store.set("key", "value");
        assert!(matches!(result, Err(StoreError::InvalidBasePath(_))));
    }
}
