//! Injected key-value persistence seam.
//!
//! The original design kept the leaderboard and per-haunt session data in
//! a browser storage singleton. Here that becomes an explicit trait so the
//! game core stays pure and tests can substitute an in-memory store.

use std::collections::HashMap;
use std::sync::Mutex;

/// Synchronous string key-value store. Matches the access pattern of the
/// data it replaces: small values, single-owner, no cross-store locking.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
    fn keys(&self) -> Vec<String>;
}

/// In-memory store used by the server and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().expect("store lock poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.inner
            .lock()
            .expect("store lock poisoned")
            .insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.inner.lock().expect("store lock poisoned").remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.inner
            .lock()
            .expect("store lock poisoned")
            .keys()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("missing").is_none());

        store.set("a", "1".to_string());
        assert_eq!(store.get("a"), Some("1".to_string()));

        store.set("a", "2".to_string());
        assert_eq!(store.get("a"), Some("2".to_string()));

        store.remove("a");
        assert!(store.get("a").is_none());

        // Removing a missing key is a no-op
        store.remove("a");
    }

    #[test]
    fn test_keys() {
        let store = MemoryStore::new();
        store.set("one", "1".to_string());
        store.set("two", "2".to_string());

        let mut keys = store.keys();
        keys.sort();
        assert_eq!(keys, vec!["one".to_string(), "two".to_string()]);
    }
}
