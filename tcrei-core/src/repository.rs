//! # Saved-item repositories
//!
//! A [`Repository`] manages a named collection of saved items (prompts or
//! chats) persisted as one JSON array under a fixed key in a
//! [`KeyValueStore`]. Names are unique within a collection (exact,
//! case-sensitive match), the collection is kept sorted ascending by name
//! after every mutation, and every successful mutation writes straight
//! through to the store so memory and store never diverge.

use crate::chat::SavedChat;
use crate::draft::SavedPrompt;
use crate::store::{KeyValueStore, StoreError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::error;

/// Store key for the saved-prompt collection.
pub const SAVED_PROMPTS_KEY: &str = "saved_prompts";
/// Store key for the saved-chat collection.
pub const SAVED_CHATS_KEY: &str = "saved_chats";

/// An item addressable by a unique name within its collection.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for SavedPrompt {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for SavedChat {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The item name was empty or whitespace-only; nothing was mutated.
    #[error("item name must not be empty")]
    EmptyName,
    /// The store rejected the write; the in-memory view was left unchanged.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
    /// The collection could not be serialized; the store was not touched.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A named collection of saved items backed by a key-value store.
pub struct Repository<T, S> {
    store: S,
    key: String,
    items: Vec<T>,
}

impl<T, S> Repository<T, S>
where
    T: Named + Clone + Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    /// Opens the collection stored under `key`, loading the current contents.
    ///
    /// An absent, unreadable or malformed stored collection opens as empty;
    /// the failure is logged, never raised.
    pub fn open(store: S, key: impl Into<String>) -> Repository<T, S> {
        let mut repo = Repository {
            store,
            key: key.into(),
            items: Vec::new(),
        };
        repo.items = repo.read_collection();
        repo
    }

    /// Re-reads the collection from the store and returns the refreshed view,
    /// sorted ascending by name.
    pub fn list(&mut self) -> &[T] {
        self.items = self.read_collection();
        &self.items
    }

    /// The current in-memory view, sorted ascending by name.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Looks up an item by exact name in the current in-memory view.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.items.iter().find(|item| item.name() == name)
    }

    /// Saves an item, replacing any existing item with the same name.
    ///
    /// Fails with [`RepositoryError::EmptyName`] when the name is empty or
    /// whitespace-only. On any write failure the in-memory view keeps its
    /// pre-call state, so memory and store stay consistent.
    pub fn save(&mut self, item: T) -> Result<(), RepositoryError> {
        if item.name().trim().is_empty() {
            return Err(RepositoryError::EmptyName);
        }

        let mut updated: Vec<T> = self
            .items
            .iter()
            .filter(|existing| existing.name() != item.name())
            .cloned()
            .collect();
        updated.push(item);
        updated.sort_by(|a, b| a.name().cmp(b.name()));

        self.write_collection(&updated)?;
        self.items = updated;
        Ok(())
    }

    /// Deletes the item with exactly this name.
    ///
    /// Deleting an absent name is a successful no-op. Write failures leave
    /// the in-memory view unchanged, as with [`Repository::save`].
    pub fn delete(&mut self, name: &str) -> Result<(), RepositoryError> {
        let updated: Vec<T> = self
            .items
            .iter()
            .filter(|existing| existing.name() != name)
            .cloned()
            .collect();

        self.write_collection(&updated)?;
        self.items = updated;
        Ok(())
    }

    fn read_collection(&self) -> Vec<T> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                error!(key = %self.key, error = %err, "failed to read collection from store");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(mut items) => {
                // Sort order is byte-wise on the name, pinned regardless of
                // what wrote the data.
                items.sort_by(|a, b| a.name().cmp(b.name()));
                items
            }
            Err(err) => {
                error!(key = %self.key, error = %err, "stored collection is malformed, treating it as empty");
                Vec::new()
            }
        }
    }

    fn write_collection(&self, items: &[T]) -> Result<(), RepositoryError> {
        let raw = serde_json::to_string(items)?;
        self.store.set(&self.key, &raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::Draft;
    use crate::persona::find_persona;
    use crate::store::MemoryStore;
    use std::io;

    fn prompt(name: &str, task: &str) -> SavedPrompt {
        SavedPrompt::new(
            name,
            &Draft {
                task: task.to_string(),
                ..Draft::default()
            },
        )
    }

    /// A store whose writes (and optionally reads) always fail.
    struct BrokenStore {
        fail_reads: bool,
    }

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            if self.fail_reads {
                Err(StoreError::Io(io::Error::other("store unavailable")))
            } else {
                Ok(None)
            }
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(io::Error::other("quota exceeded")))
        }
    }

    #[test]
    fn test_open_empty_store() {
        let repo: Repository<SavedPrompt, _> =
            Repository::open(MemoryStore::new(), SAVED_PROMPTS_KEY);
        assert!(repo.items().is_empty());
    }

    #[test]
    fn test_save_then_list_round_trip() {
        let mut repo = Repository::open(MemoryStore::new(), SAVED_PROMPTS_KEY);

        let saved = SavedPrompt::new(
            "X",
            &Draft {
                persona: find_persona("software_engineer"),
                task: "Write a function".to_string(),
                context: "A Rust codebase".to_string(),
                references: String::new(),
            },
        );
        repo.save(saved.clone()).unwrap();

        let listed = repo.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], saved);
    }

    #[test]
    fn test_save_replaces_by_name() {
        let mut repo = Repository::open(MemoryStore::new(), SAVED_PROMPTS_KEY);

        repo.save(prompt("Greeting", "Say hi")).unwrap();
        repo.save(prompt("Greeting", "Say hello")).unwrap();

        assert_eq!(repo.items().len(), 1);
        assert_eq!(repo.get("Greeting").unwrap().task, "Say hello");
    }

    #[test]
    fn test_name_collision_is_case_sensitive() {
        let mut repo = Repository::open(MemoryStore::new(), SAVED_PROMPTS_KEY);

        repo.save(prompt("greeting", "lower")).unwrap();
        repo.save(prompt("Greeting", "upper")).unwrap();

        assert_eq!(repo.items().len(), 2);
    }

    #[test]
    fn test_list_is_sorted_bytewise_by_name() {
        let mut repo = Repository::open(MemoryStore::new(), SAVED_PROMPTS_KEY);

        repo.save(prompt("Banana", "")).unwrap();
        repo.save(prompt("apple", "")).unwrap();
        repo.save(prompt("Cherry", "")).unwrap();

        let names: Vec<&str> = repo.list().iter().map(|p| p.name()).collect();
        // Byte-wise order puts uppercase before lowercase.
        assert_eq!(names, vec!["Banana", "Cherry", "apple"]);
    }

    #[test]
    fn test_save_empty_name_is_rejected() {
        let mut repo = Repository::open(MemoryStore::new(), SAVED_PROMPTS_KEY);

        let result = repo.save(prompt("   ", "whatever"));
        assert!(matches!(result, Err(RepositoryError::EmptyName)));
        assert!(repo.items().is_empty());
    }

    #[test]
    fn test_delete_removes_item_and_writes_through() {
        let store = MemoryStore::new();
        let mut repo = Repository::open(store, SAVED_PROMPTS_KEY);

        repo.save(prompt("keep", "")).unwrap();
        repo.save(prompt("drop", "")).unwrap();
        repo.delete("drop").unwrap();

        assert_eq!(repo.items().len(), 1);
        assert!(repo.get("drop").is_none());

        // The refreshed view agrees with the store.
        assert_eq!(repo.list().len(), 1);
    }

    #[test]
    fn test_delete_absent_name_is_a_noop() {
        let mut repo = Repository::open(MemoryStore::new(), SAVED_PROMPTS_KEY);
        repo.save(prompt("only", "")).unwrap();

        assert!(repo.delete("never existed").is_ok());
        assert_eq!(repo.items().len(), 1);
    }

    #[test]
    fn test_malformed_stored_collection_lists_as_empty() {
        let store = MemoryStore::new();
        store.set(SAVED_PROMPTS_KEY, "not json at all [[[").unwrap();

        let mut repo: Repository<SavedPrompt, _> =
            Repository::open(store, SAVED_PROMPTS_KEY);
        assert!(repo.list().is_empty());
    }

    #[test]
    fn test_unreadable_store_lists_as_empty() {
        let mut repo: Repository<SavedPrompt, _> =
            Repository::open(BrokenStore { fail_reads: true }, SAVED_PROMPTS_KEY);
        assert!(repo.list().is_empty());
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let mut repo: Repository<SavedPrompt, _> =
            Repository::open(BrokenStore { fail_reads: false }, SAVED_PROMPTS_KEY);

        let result = repo.save(prompt("doomed", "task"));
        assert!(matches!(result, Err(RepositoryError::Storage(_))));
        assert!(repo.items().is_empty());

        let result = repo.delete("anything");
        assert!(matches!(result, Err(RepositoryError::Storage(_))));
    }

    #[test]
    fn test_chat_repository_snapshot_semantics() {
        use crate::chat::{Message, SavedChat};

        let mut repo = Repository::open(MemoryStore::new(), SAVED_CHATS_KEY);

        let mut messages = vec![Message::user("hi"), Message::model("hello")];
        repo.save(SavedChat::new("first", messages.clone())).unwrap();

        // Later activity must not change the stored snapshot.
        messages.push(Message::user("one more thing"));
        assert_eq!(repo.get("first").unwrap().messages.len(), 2);
    }
}
