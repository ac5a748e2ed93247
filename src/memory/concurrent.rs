//! [`DashMap`]-backed resource memory.

use std::{
    collections::HashMap,
    fmt,
    hash::Hash,
    time::{Duration, SystemTime},
};

use dashmap::{DashMap, mapref::entry::Entry};

use super::{ResourceMemory, Stamped};

/// Concurrent registry of the latest value per key.
///
/// Each [`update`](ResourceMemory::update) runs under the write lock of the
/// shard owning the key, so the previous value is read and replaced in one
/// step. [`view`](ResourceMemory::view) and [`within`](Self::within) walk the
/// shards one at a time and are therefore snapshot-consistent per shard only;
/// updates racing with the walk may or may not be reflected.
pub struct ConcurrentMemory<K, V>(DashMap<K, V>)
where
    K: Eq + Hash;

impl<K, V> ConcurrentMemory<K, V>
where
    K: Eq + Hash,
{
    /// Create an empty memory.
    #[must_use]
    pub fn new() -> Self { Self(DashMap::new()) }

    /// Create an empty memory with room for `capacity` keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self { Self(DashMap::with_capacity(capacity)) }
}

impl<K, V> Default for ConcurrentMemory<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self { Self::new() }
}

impl<K, V> fmt::Debug for ConcurrentMemory<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentMemory")
            .field("len", &self.0.len())
            .finish()
    }
}

impl<K, V> ResourceMemory<K, V> for ConcurrentMemory<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    fn update(&self, key: K, value: V) -> Option<V> {
        match self.0.entry(key) {
            Entry::Occupied(mut occupied) => Some(occupied.insert(value)),
            Entry::Vacant(vacant) => {
                vacant.insert(value);
                None
            }
        }
    }

    fn remove(&self, key: &K) -> bool { self.0.remove(key).is_some() }

    fn try_get(&self, key: &K) -> Option<V> { self.0.get(key).map(|entry| entry.value().clone()) }

    fn view(&self) -> HashMap<K, V> {
        self.0
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    fn len(&self) -> usize { self.0.len() }
}

impl<K, V> ConcurrentMemory<K, V>
where
    K: Eq + Hash + Clone,
    V: Stamped,
{
    /// Keys whose value was stamped less than `window` before now.
    ///
    /// The order of the returned keys carries no meaning.
    #[must_use]
    pub fn within(&self, window: Duration) -> Vec<K> { self.within_at(SystemTime::now(), window) }

    /// Keys whose value was stamped less than `window` before `now`.
    ///
    /// Stamps later than `now` count as age zero.
    #[must_use]
    pub fn within_at(&self, now: SystemTime, window: Duration) -> Vec<K> {
        self.0
            .iter()
            .filter(|entry| entry.value().stamp().is_within(now, window))
            .map(|entry| entry.key().clone())
            .collect()
    }
}
