//! Concurrent registries remembering the latest value seen per key.
//!
//! A resource memory keeps at most one value per key: the most recently
//! observed one. Entries appear on the first [`ResourceMemory::update`], are
//! overwritten by later updates, and disappear only through
//! [`ResourceMemory::remove`]. Nothing expires passively; a windowed query
//! over [`Stamped`] values merely filters what it reports.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use presence::memory::{ConcurrentMemory, ResourceMemory, Timestamp};
//!
//! let memory = ConcurrentMemory::<String, Timestamp>::default();
//! assert_eq!(memory.update("alpha".into(), Timestamp::now()), None);
//! assert_eq!(memory.within(Duration::from_secs(1)), vec!["alpha".to_string()]);
//! ```

use std::{collections::HashMap, hash::Hash};

mod concurrent;
mod timestamp;

pub use concurrent::ConcurrentMemory;
pub use timestamp::{Stamped, Timestamp};

/// Contract shared by registries that remember the latest value per key.
///
/// Every method takes `&self`; implementations must be safe to call from many
/// threads at once without external locking.
pub trait ResourceMemory<K, V>: Send + Sync
where
    K: Eq + Hash,
{
    /// Insert `value` for `key`, returning the value it replaced.
    ///
    /// The replacement is a single atomic step: concurrent readers observe
    /// either the previous value or `value`, never a gap between them.
    fn update(&self, key: K, value: V) -> Option<V>;

    /// Delete the entry for `key`. Returns `true` if an entry was removed.
    fn remove(&self, key: &K) -> bool;

    /// Look up the value for `key`.
    fn try_get(&self, key: &K) -> Option<V>;

    /// Look up the value for `key`, falling back to `V::default()`.
    fn get(&self, key: &K) -> V
    where
        V: Default,
    {
        self.try_get(key).unwrap_or_default()
    }

    /// Take an owned point-in-time copy of every entry.
    fn view(&self) -> HashMap<K, V>;

    /// Number of entries currently held.
    fn len(&self) -> usize;

    /// Returns `true` when no entries are held.
    fn is_empty(&self) -> bool { self.len() == 0 }
}

#[cfg(test)]
mod tests;
