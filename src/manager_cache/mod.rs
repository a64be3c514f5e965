use std::collections::HashMap;
use std::time::{Duration, Instant};
use crate::manager_owm::models::Units;

/// Cache key for one upstream query, city matching is case-insensitive
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    city: String,
    units: Units,
}

impl CacheKey {
    /// Returns a normalized cache key
    ///
    /// # Arguments
    ///
    /// * 'city' - city as given by the caller
    /// * 'units' - unit system of the query
    pub fn new(city: &str, units: Units) -> CacheKey {
        CacheKey {
            city: city.trim().to_lowercase(),
            units,
        }
    }
}

struct Entry<T> {
    stored_at: Instant,
    value: T,
}

/// Fixed time-to-live cache for upstream response snapshots
///
/// Expired entries are evicted on read. The cache holds whatever was fetched
/// last per (city, units) pair, so a stale entry is simply replaced by the
/// next successful fetch.
pub struct Cache<T: Clone> {
    ttl: Duration,
    entries: HashMap<CacheKey, Entry<T>>,
}

impl<T: Clone> Cache<T> {
    /// Creates a new cache with the given time-to-live
    ///
    /// # Arguments
    ///
    /// * 'ttl' - how long entries stay valid after insertion
    pub fn new(ttl: Duration) -> Cache<T> {
        Cache {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Returns the cached value for the key if one exists and is still fresh
    ///
    /// # Arguments
    ///
    /// * 'key' - cache key to look up
    pub fn get(&mut self, key: &CacheKey) -> Option<T> {
        match self.entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores a value for the key, replacing any previous entry
    ///
    /// # Arguments
    ///
    /// * 'key' - cache key to store under
    /// * 'value' - value to store
    pub fn put(&mut self, key: CacheKey, value: T) {
        self.entries.insert(key, Entry { stored_at: Instant::now(), value });
    }
}
