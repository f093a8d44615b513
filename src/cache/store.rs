//! Cache Store Module
//!
//! Keyed container of cache entries with lazy eviction on read and
//! carryover of previously supplied TTLs across repeated writes.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats};
use crate::error::{CacheError, CacheResult};

// == Cache ==
/// In-memory cache with TTL expiration and TTL carryover.
///
/// An entry whose TTL has lapsed is logically absent: read operations that
/// observe expiry evict the entry before reporting the miss. Remembered
/// TTLs in `key_ttl` outlive the entries themselves and are only cleared by
/// `reset_remembered_ttl` or `flush`.
#[derive(Debug, Default)]
pub struct Cache<V> {
    /// Key-value storage, one entry per key, last-write-wins
    entries: HashMap<String, CacheEntry<V>>,
    /// Most recently explicitly supplied TTL per key (first-write-wins)
    key_ttl: HashMap<String, Duration>,
    /// Performance statistics
    stats: CacheStats,
}

impl<V> Cache<V> {
    // == Constructor ==
    /// Creates a new empty Cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            key_ttl: HashMap::new(),
            stats: CacheStats::new(),
        }
    }

    // == Put ==
    /// Stores a key-value pair with optional TTL, replacing any existing entry.
    ///
    /// TTL carryover rule:
    /// - no TTL supplied, one remembered for the key: the remembered TTL is
    ///   applied to the new entry (measured from the new entry's creation)
    /// - TTL supplied, none remembered: the supplied TTL is remembered
    /// - TTL supplied, one already remembered: the remembered TTL is left
    ///   untouched
    ///
    /// # Arguments
    /// * `key` - The key to store the value under
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL; `None` means no expiration unless one is
    ///   remembered for the key
    pub fn put(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();

        let effective_ttl = match (ttl, self.key_ttl.get(&key)) {
            (None, Some(&remembered)) => Some(remembered),
            (Some(supplied), None) => {
                self.key_ttl.insert(key.clone(), supplied);
                Some(supplied)
            }
            (supplied, _) => supplied,
        };

        self.entries.insert(key, CacheEntry::new(value, effective_ttl));
    }

    // == Has Unchecked ==
    /// Membership test with no expiry evaluation and no side effects.
    ///
    /// # Arguments
    /// * `key` - The key to check
    pub fn has_unchecked(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Has ==
    /// Checks if a live entry exists for the key, evicting it if expired.
    ///
    /// Does not consult or mutate the remembered TTLs.
    ///
    /// # Arguments
    /// * `key` - The key to check
    pub fn has(&mut self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(entry) if entry.has_expired() => {
                self.entries.remove(key);
                self.stats.record_expiration();
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    // == Remove ==
    /// Removes the entry for a key if a live one exists; no-op otherwise.
    ///
    /// Does not touch the remembered TTL for the key.
    ///
    /// # Arguments
    /// * `key` - The key to remove
    pub fn remove(&mut self, key: &str) {
        if self.has(key) {
            self.entries.remove(key);
        }
    }

    // == Get ==
    /// Retrieves the entry for a key if it exists and hasn't expired.
    ///
    /// An expired entry is evicted as a side effect and reported as
    /// `CacheError::Expired` carrying the remembered TTL for the key, which
    /// callers may re-apply when repopulating.
    ///
    /// # Arguments
    /// * `key` - The key to look up
    ///
    /// # Errors
    /// - `CacheError::NotFound` when the key was never stored
    /// - `CacheError::Expired` when the entry lapsed
    pub fn get(&mut self, key: &str) -> CacheResult<CacheEntry<V>>
    where
        V: Clone,
    {
        if let Some(entry) = self.entries.get(key) {
            if entry.has_expired() {
                self.entries.remove(key);
                self.stats.record_expiration();
                self.stats.record_miss();
                return Err(CacheError::Expired {
                    key: key.to_owned(),
                    remembered_ttl: self.key_ttl.get(key).copied(),
                });
            }

            let entry = entry.clone();
            self.stats.record_hit();
            Ok(entry)
        } else {
            self.stats.record_miss();
            Err(CacheError::NotFound {
                key: key.to_owned(),
            })
        }
    }

    // == Reset Remembered TTL ==
    /// Forgets the remembered TTL for a key, leaving any live entry untouched.
    ///
    /// Subsequent bare `put` calls for the key store entries with no
    /// expiration unless a TTL is supplied again.
    ///
    /// # Arguments
    /// * `key` - The key to reset the remembered TTL for
    pub fn reset_remembered_ttl(&mut self, key: &str) {
        self.key_ttl.remove(key);
    }

    // == Remembered TTL ==
    /// Returns the remembered TTL for a key, if any.
    pub fn remembered_ttl(&self, key: &str) -> Option<Duration> {
        self.key_ttl.get(key).copied()
    }

    // == Flush ==
    /// Clears all entries and all remembered TTLs.
    pub fn flush(&mut self) {
        self.entries.clear();
        self.key_ttl.clear();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    ///
    /// Includes expired entries that have not been lazily evicted yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
