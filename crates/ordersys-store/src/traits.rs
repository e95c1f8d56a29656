//! Store trait definitions

use crate::StoreResult;

/// String-keyed durable storage, the local-storage seam of the client
pub trait KeyValueStorage: Send + Sync {
    /// Read a value, `None` if the key is absent
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Insert or overwrite a value
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove a key; removing an absent key is not an error
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Check if store is healthy
    fn is_healthy(&self) -> bool;
}
