// src/load_cache.rs
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Time-boxed store for loaded tables. Entries older than the TTL are
/// treated as missing; `invalidate` drops everything at once.
pub struct LoadCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K: Eq + Hash, V: Clone> LoadCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        LoadCache {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &K, now: Instant) -> Option<V> {
        self.entries
            .get(key)
            .filter(|entry| now.saturating_duration_since(entry.stored_at) < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Overwrites any previous entry for the key.
    pub fn insert(&mut self, key: K, value: V, now: Instant) {
        self.entries.insert(key, CacheEntry { value, stored_at: now });
    }

    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_within_ttl() {
        let start = Instant::now();
        let mut cache = LoadCache::new(Duration::from_secs(60));
        cache.insert("orders.xlsx", 3, start);

        assert_eq!(cache.get(&"orders.xlsx", start), Some(3));
        assert_eq!(cache.get(&"orders.xlsx", start + Duration::from_secs(59)), Some(3));
        assert_eq!(cache.get(&"other.xlsx", start), None);
    }

    #[test]
    fn test_entry_expires_at_ttl() {
        let start = Instant::now();
        let mut cache = LoadCache::new(Duration::from_secs(60));
        cache.insert("orders.xlsx", 3, start);

        assert_eq!(cache.get(&"orders.xlsx", start + Duration::from_secs(60)), None);
        assert_eq!(cache.get(&"orders.xlsx", start + Duration::from_secs(61)), None);
    }

    #[test]
    fn test_invalidate_ignores_window() {
        let start = Instant::now();
        let mut cache = LoadCache::new(Duration::from_secs(60));
        cache.insert("a", 1, start);
        cache.insert("b", 2, start);

        cache.invalidate();
        assert_eq!(cache.get(&"a", start), None);
        assert_eq!(cache.get(&"b", start), None);
    }

    #[test]
    fn test_last_write_wins() {
        let start = Instant::now();
        let mut cache = LoadCache::new(Duration::from_secs(60));
        cache.insert("a", 1, start);
        cache.insert("a", 2, start + Duration::from_secs(30));

        assert_eq!(cache.get(&"a", start + Duration::from_secs(80)), Some(2));
    }
}
