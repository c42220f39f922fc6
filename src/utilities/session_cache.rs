//! Stamp-invalidated per-user cache.
//!
//! Host applications keep one expensively built agent/runner per user and
//! must rebuild it when that user's stored preferences change. This cache
//! makes that contract explicit: entries are keyed by user, every call
//! passes the key (no ambient request state), and a newer preference stamp
//! forces a rebuild on the next lookup.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

struct CacheEntry<V> {
    value: Arc<V>,
    stamp: Option<DateTime<Utc>>,
}

/// Thread-safe get-or-create cache keyed by user identity.
pub struct SessionCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
}

impl<V> Default for SessionCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SessionCache<V> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Fetch the cached value for `key`, building it if absent or stale.
    ///
    /// An entry is stale when `stamp` is newer than the stamp it was built
    /// with; passing `None` never invalidates. The stamp is typically the
    /// preference store's last-updated time, so a preference change means
    /// the next turn gets a freshly built value.
    pub fn get_or_create<F>(&self, key: &str, stamp: Option<DateTime<Utc>>, build: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                let stale = match (stamp, occupied.get().stamp) {
                    (Some(new), Some(old)) => new > old,
                    (Some(_), None) => true,
                    (None, _) => false,
                };
                if stale {
                    log::debug!("session cache rebuild for {key}: preference state advanced");
                    let entry = CacheEntry {
                        value: Arc::new(build()),
                        stamp,
                    };
                    occupied.insert(entry);
                }
                Arc::clone(&occupied.get().value)
            }
            Entry::Vacant(vacant) => {
                let entry = CacheEntry {
                    value: Arc::new(build()),
                    stamp,
                };
                Arc::clone(&vacant.insert(entry).value)
            }
        }
    }

    /// Drop the cached value for `key`; returns whether one existed.
    pub fn invalidate(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every cached value.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn stamp(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_builds_once_per_key() {
        let cache: SessionCache<String> = SessionCache::new();
        let builds = AtomicUsize::new(0);

        let first = cache.get_or_create("alice", None, || {
            builds.fetch_add(1, Ordering::SeqCst);
            "agent".to_string()
        });
        let second = cache.get_or_create("alice", None, || {
            builds.fetch_add(1, Ordering::SeqCst);
            "agent".to_string()
        });

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_newer_stamp_forces_rebuild() {
        let cache: SessionCache<u32> = SessionCache::new();

        let v1 = cache.get_or_create("bob", Some(stamp(100)), || 1);
        // Same stamp: cached value survives.
        let v2 = cache.get_or_create("bob", Some(stamp(100)), || 2);
        // Preferences advanced: rebuild.
        let v3 = cache.get_or_create("bob", Some(stamp(200)), || 3);

        assert_eq!(*v1, 1);
        assert_eq!(*v2, 1);
        assert_eq!(*v3, 3);
    }

    #[test]
    fn test_invalidate_drops_entry() {
        let cache: SessionCache<u32> = SessionCache::new();
        cache.get_or_create("carol", None, || 7);
        assert!(cache.invalidate("carol"));
        assert!(!cache.invalidate("carol"));
        let rebuilt = cache.get_or_create("carol", None, || 8);
        assert_eq!(*rebuilt, 8);
    }

    #[test]
    fn test_keys_are_independent() {
        let cache: SessionCache<&'static str> = SessionCache::new();
        cache.get_or_create("a", None, || "for-a");
        cache.get_or_create("b", None, || "for-b");
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }
}
