//! # Registry
//!
//! This module provides a keyed registry that allows for type-safe storage and retrieval
//! of shared values that are resolved once and reused for the lifetime of the process.
//!
//! The material capability table uses it to memoize the descriptor resolved for each
//! material id, so that the fallback chain (exact id, canonical id, defaults) runs at
//! most once per material.

use std::{collections::HashMap, hash::Hash, sync::Arc};

use super::MtResource;

/// A thread-safe registry mapping keys to shared, immutable values.
///
/// Values are handed out as `Arc<V>` so callers can hold on to them without keeping the
/// registry locked.
///
/// # Examples
/// ```
/// use vein_miner::core::Registry;
///
/// let registry = Registry::new();
/// let stone = registry.get_or_insert_with("stone", || 64u32);
/// let again = registry.get_or_insert_with("stone", || 1);
/// assert_eq!((*stone, *again), (64, 64));
/// ```
pub struct Registry<K: Send + Sync, V: Send + Sync> {
    entries: MtResource<HashMap<K, Arc<V>>>,
}

impl<K, V> Registry<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Creates a new, empty `Registry`.
    pub fn new() -> Self {
        Self {
            entries: MtResource::new(HashMap::new()),
        }
    }

    /// Retrieves the value for `key`, resolving and storing it first if it is missing.
    ///
    /// `resolve` runs at most once per key as long as it does not itself touch this
    /// registry.
    pub fn get_or_insert_with(&self, key: K, resolve: impl FnOnce() -> V) -> Arc<V> {
        if let Some(value) = self.entries.get().get(&key) {
            return value.clone();
        }

        let mut entries = self.entries.get_mut();
        entries
            .entry(key)
            .or_insert_with(|| Arc::new(resolve()))
            .clone()
    }
}

impl<K, V> Default for Registry<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_resolver_runs_once_per_key() {
        let registry: Registry<u32, u32> = Registry::new();
        let calls = Cell::new(0);

        for _ in 0..3 {
            let value = registry.get_or_insert_with(5, || {
                calls.set(calls.get() + 1);
                50
            });
            assert_eq!(*value, 50);
        }

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_keys_resolve_independently() {
        let registry = Registry::new();
        let first = registry.get_or_insert_with(1u8, || "one");
        let second = registry.get_or_insert_with(2u8, || "two");

        assert_eq!((*first, *second), ("one", "two"));
        assert!(Arc::ptr_eq(&first, &registry.get_or_insert_with(1u8, || "other")));
    }
}
