//! In-memory store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::common::error::StoreResult;
use crate::store::KeyValueStore;

/// A store kept in memory. Clones share the same values.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value for `key`, bypassing the trait.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.get(key))
    }

    fn save(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_values() {
        let store = MemoryStore::new();
        let mut writer = store.clone();
        writer.save("format", "{msg}").unwrap();
        assert_eq!(store.load("format").unwrap().as_deref(), Some("{msg}"));
        assert_eq!(store.load("missing").unwrap(), None);
    }
}
