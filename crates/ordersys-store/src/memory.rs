//! In-memory store implementation

use std::collections::HashMap;
use std::sync::Mutex;

use crate::{KeyValueStorage, StoreError, StoreResult};

/// Non-durable store backed by a map, for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing entries
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let values = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }

    pub fn len(&self) -> usize {
        self.values.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        values.remove(key);
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        self.values.lock().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_entries_are_readable() {
        let store = MemoryStorage::with_entries([("userToken", "tok")]);

        assert_eq!(store.get("userToken").unwrap().as_deref(), Some("tok"));
        assert!(store.get("isAdmin").unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_clears_entry() {
        let store = MemoryStorage::new();
        store.set("isAdmin", "true").unwrap();
        store.remove("isAdmin").unwrap();

        assert!(store.is_empty());
        assert!(store.is_healthy());
    }
}
