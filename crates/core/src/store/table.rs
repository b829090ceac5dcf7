//! Expiring key/value table backing one store category.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use super::key::CacheKey;

/// Cached value with the instant it was written.
struct Entry<V> {
    value: V,
    stored_at: Instant,
}

impl<V> Entry<V> {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() >= ttl
    }
}

/// A table of entries sharing one TTL.
///
/// Writes overwrite unconditionally and restart the entry's TTL. Reads never
/// return an expired entry; expired entries are dropped by [`Table::purge_expired`].
pub(crate) struct Table<V> {
    entries: RwLock<HashMap<CacheKey, Entry<V>>>,
    ttl: Duration,
}

impl<V: Clone> Table<V> {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self { entries: RwLock::new(HashMap::new()), ttl }
    }

    pub(crate) fn insert(&self, key: CacheKey, value: V) {
        self.entries
            .write()
            .insert(key, Entry { value, stored_at: Instant::now() });
    }

    pub(crate) fn get(&self, key: &CacheKey) -> Option<V> {
        let entries = self.entries.read();
        entries
            .get(key)
            .filter(|entry| !entry.is_expired(self.ttl))
            .map(|entry| entry.value.clone())
    }

    /// Drops expired entries, returning how many were removed.
    pub(crate) fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(self.ttl));
        before - entries.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }
}
