//! In-memory response cache keyed by canonical request URL.

use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Vec<Value>,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) < self.ttl
    }
}

/// Time-expiring store for decoded upstream payloads.
///
/// Expired entries are treated as absent and evicted lazily on the lookup
/// that finds them; nothing sweeps the map in the background. The key space
/// is the small set of distinct (endpoint, parameters) combinations the
/// client issues, so there is no size bound.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: HashMap<String, CacheEntry>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, key: &str) -> Option<Vec<Value>> {
        self.get_at(key, Instant::now())
    }

    pub fn put(&mut self, key: &str, payload: Vec<Value>, ttl: Duration) {
        self.put_at(key, payload, ttl, Instant::now());
    }

    /// Lookup against an explicit clock reading. Callers cannot tell a key
    /// that was never stored from one that expired.
    pub fn get_at(&mut self, key: &str, now: Instant) -> Option<Vec<Value>> {
        let entry = self.entries.get(key)?;
        if entry.is_fresh(now) {
            return Some(entry.payload.clone());
        }
        self.entries.remove(key);
        None
    }

    /// Store or overwrite the entry for `key`.
    pub fn put_at(&mut self, key: &str, payload: Vec<Value>, ttl: Duration, now: Instant) {
        self.entries.insert(
            key.to_owned(),
            CacheEntry {
                payload,
                stored_at: now,
                ttl,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TTL: Duration = Duration::from_secs(60);

    #[test]
    fn entry_is_served_until_ttl_elapses() {
        let mut cache = ResponseCache::new();
        let t0 = Instant::now();
        cache.put_at("k", vec![json!({"id": 1})], TTL, t0);

        assert_eq!(cache.get_at("k", t0), Some(vec![json!({"id": 1})]));
        assert!(cache.get_at("k", t0 + Duration::from_secs(59)).is_some());
        assert!(cache.get_at("k", t0 + TTL).is_none());
    }

    #[test]
    fn expired_entry_is_evicted_on_lookup() {
        let mut cache = ResponseCache::new();
        let t0 = Instant::now();
        cache.put_at("k", vec![], TTL, t0);
        assert_eq!(cache.len(), 1);

        assert!(cache.get_at("k", t0 + Duration::from_secs(61)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn put_overwrites_and_restarts_the_clock() {
        let mut cache = ResponseCache::new();
        let t0 = Instant::now();
        cache.put_at("k", vec![json!(1)], TTL, t0);
        cache.put_at("k", vec![json!(2)], TTL, t0 + Duration::from_secs(50));

        let later = t0 + Duration::from_secs(100);
        assert_eq!(cache.get_at("k", later), Some(vec![json!(2)]));
    }

    #[test]
    fn unknown_key_is_absent() {
        let mut cache = ResponseCache::new();
        assert!(cache.get("missing").is_none());
    }
}
