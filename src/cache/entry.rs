//! Cache Entry Module
//!
//! Defines the wrapper for individual cached values with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Wraps one cached value with its creation instant and optional TTL.
///
/// Entries are immutable after construction; a repeated `put` for the same
/// key replaces the entry rather than mutating it.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value, opaque to the cache
    value: V,
    /// Instant captured at construction, never mutated
    created_at: Instant,
    /// Time-to-live, None = never expires
    ttl: Option<Duration>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry with optional TTL.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Optional time-to-live; `None` means the entry never expires
    pub fn new(value: V, ttl: Option<Duration>) -> Self {
        Self {
            value,
            created_at: Instant::now(),
            ttl,
        }
    }

    // == Value ==
    /// Returns a reference to the wrapped value.
    ///
    /// Performs no expiry check; callers go through `Cache::get` for that.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the entry and returns the wrapped value.
    pub fn into_value(self) -> V {
        self.value
    }

    /// Returns the instant at which this entry was created.
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Returns the TTL this entry was stored with, if any.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    // == Has Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired strictly after its TTL has
    /// elapsed; at exactly `created_at + ttl` it is still live.
    ///
    /// # Returns
    /// - `true` if the entry has a TTL and more than `ttl` has elapsed
    /// - `false` if the entry has no TTL (never expires) or TTL hasn't elapsed
    pub fn has_expired(&self) -> bool {
        match self.ttl {
            Some(ttl) => self.created_at.elapsed() > ttl,
            None => false,
        }
    }

    // == TTL Remaining ==
    /// Returns the remaining TTL, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired
    /// - `Some(remaining)` if the entry has a TTL and hasn't expired
    /// - `None` if the entry has no TTL (never expires)
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.ttl.map(|ttl| ttl.saturating_sub(self.created_at.elapsed()))
    }
}
