//! Shared concurrent key/value store
//!
//! The crawler keeps two of these: the visited set and the results store.
//! Every mutation takes the write lock, so `claim_if_absent` is the single
//! dedup primitive: of any number of tasks racing on the same key, exactly
//! one observes `true`.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock};

/// A cloneable handle to a mutex-guarded map shared between tasks
#[derive(Debug)]
pub struct SharedStore<K, V> {
    inner: Arc<RwLock<HashMap<K, V>>>,
}

impl<K, V> Clone for SharedStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for SharedStore<K, V> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<K, V> SharedStore<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` only if `key` is absent
    ///
    /// # Returns
    ///
    /// * `true` - The key was absent and has been inserted
    /// * `false` - The key was already present; the store is unchanged
    pub fn claim_if_absent(&self, key: K, value: V) -> bool {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        if map.contains_key(&key) {
            return false;
        }

        map.insert(key, value);
        true
    }

    /// Inserts or overwrites the value for `key`
    pub fn set(&self, key: K, value: V) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(key, value);
    }

    /// Removes `key` if present
    pub fn remove(&self, key: &K) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.remove(key);
    }

    /// Returns true if `key` is present
    pub fn contains(&self, key: &K) -> bool {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.contains_key(key)
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.len()
    }

    /// Returns whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> SharedStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Returns a copy of the current contents
    ///
    /// Writes made after the snapshot is taken are not reflected. The crawler
    /// only calls this once every writer has finished.
    pub fn snapshot(&self) -> HashMap<K, V> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.clone()
    }
}
