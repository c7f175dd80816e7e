use crate::config::CacheConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// Custom error types for cache operations
#[derive(Debug)]
pub enum CacheError {
    LockError(String),
    InvalidKey(String),
}

impl std::fmt::Display for CacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheError::LockError(msg) => write!(f, "Cache lock error: {}", msg),
            CacheError::InvalidKey(key) => write!(f, "Invalid cache key: {}", key),
        }
    }
}

impl std::error::Error for CacheError {}

// One entry per insertion; every alias key indexes the same Arc so an
// ID lookup and a name lookup return the identical value.
#[derive(Debug)]
struct CacheEntry<T> {
    value: Arc<T>,
    cached_at: Instant,
}

impl<T> Clone for CacheEntry<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            cached_at: self.cached_at,
        }
    }
}

impl<T> CacheEntry<T> {
    fn new(value: Arc<T>) -> Self {
        Self {
            value,
            cached_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() > ttl
    }
}

// Statistics for cache monitoring
#[derive(Debug, Default, Clone)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub removes: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            self.hits as f64 / (self.hits + self.misses) as f64
        }
    }
}

// In-memory TTL cache with case-insensitive alias keys. Expiry is checked
// lazily on read; there is no background eviction.
pub struct TtlCache<T> {
    store: Arc<Mutex<HashMap<String, CacheEntry<T>>>>,
    ttl: Duration,
    stats: Arc<Mutex<CacheStats>>,
}

// Keys are matched ignoring case and surrounding whitespace.
fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        tracing::info!("Initializing TTL cache with expiration: {:?}", ttl);

        Self {
            store: Arc::new(Mutex::new(HashMap::new())),
            ttl,
            stats: Arc::new(Mutex::new(CacheStats::default())),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(Duration::from_secs(config.expiration))
    }

    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        let key = normalize_key(key);
        if key.is_empty() {
            tracing::warn!("Attempted to get cache entry with empty key");
            return None;
        }

        match self.store.lock() {
            Ok(mut store) => {
                let expired = match store.get(&key) {
                    Some(entry) if entry.is_expired(self.ttl) => true,
                    Some(entry) => {
                        tracing::debug!("Cache hit for key: {}", key);
                        let value = Arc::clone(&entry.value);
                        if let Ok(mut stats) = self.stats.lock() {
                            stats.hits += 1;
                        }
                        return Some(value);
                    }
                    None => {
                        tracing::debug!("Cache miss for key: {}", key);
                        if let Ok(mut stats) = self.stats.lock() {
                            stats.misses += 1;
                        }
                        return None;
                    }
                };

                if expired {
                    tracing::debug!("Cache entry expired for key: {}", key);
                    store.remove(&key);
                    if let Ok(mut stats) = self.stats.lock() {
                        stats.misses += 1;
                        stats.removes += 1;
                    }
                }
                None
            }
            Err(e) => {
                tracing::error!("Failed to acquire cache lock for key {}: {}", key, e);
                None
            }
        }
    }

    // Inserts one shared entry under every given alias key. Accepts either
    // an owned value or an already-shared `Arc`.
    pub fn put<V, K>(&self, value: V, keys: &[K]) -> Result<(), CacheError>
    where
        V: Into<Arc<T>>,
        K: AsRef<str>,
    {
        let aliases: Vec<String> = keys
            .iter()
            .map(|k| normalize_key(k.as_ref()))
            .filter(|k| !k.is_empty())
            .collect();
        if aliases.is_empty() {
            return Err(CacheError::InvalidKey(
                "At least one non-empty key is required".to_string(),
            ));
        }

        match self.store.lock() {
            Ok(mut store) => {
                let entry = CacheEntry::new(value.into());
                for alias in &aliases {
                    let was_present = store.insert(alias.clone(), entry.clone()).is_some();
                    if was_present {
                        tracing::debug!("Updated existing cache entry: {}", alias);
                    } else {
                        tracing::debug!("Inserted new cache entry: {}", alias);
                    }
                }

                if let Ok(mut stats) = self.stats.lock() {
                    stats.inserts += 1;
                }

                Ok(())
            }
            Err(e) => {
                let error_msg = format!("Failed to acquire cache write lock: {}", e);
                tracing::error!("{}", error_msg);
                Err(CacheError::LockError(error_msg))
            }
        }
    }

    // Sweep out expired entries. Callable by interested owners; never runs
    // on its own.
    pub fn purge_expired(&self) {
        if let Ok(mut store) = self.store.lock() {
            let expired_keys: Vec<String> = store
                .iter()
                .filter(|(_, entry)| entry.is_expired(self.ttl))
                .map(|(key, _)| key.clone())
                .collect();

            let expired_count = expired_keys.len();
            for key in expired_keys {
                store.remove(&key);
                tracing::debug!("Removed expired cache entry: {}", key);
            }

            if expired_count > 0 {
                tracing::debug!("Purged {} expired cache entries", expired_count);
                if let Ok(mut stats) = self.stats.lock() {
                    stats.removes += expired_count as u64;
                }
            }
        } else {
            tracing::error!("Failed to acquire lock for cache purge");
        }
    }

    pub fn clear(&self) {
        match self.store.lock() {
            Ok(mut store) => {
                let size = store.len();
                store.clear();
                tracing::info!("Cleared cache ({} entries)", size);
                if let Ok(mut stats) = self.stats.lock() {
                    *stats = CacheStats::default();
                }
            }
            Err(e) => {
                tracing::error!("Failed to acquire cache write lock for clearing: {}", e);
            }
        }
    }

    pub fn len(&self) -> usize {
        match self.store.lock() {
            Ok(store) => store.len(),
            Err(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key(&self, key: &str) -> bool {
        match self.store.lock() {
            Ok(store) => store.contains_key(&normalize_key(key)),
            Err(_) => false,
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
            .lock()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }

    pub fn hit_rate(&self) -> f64 {
        self.stats().hit_rate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_basic_operations() {
        let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(3600));

        assert!(
            cache
                .put(r#"{"id": 25, "name": "pikachu"}"#.to_string(), &["25"])
                .is_ok()
        );

        let retrieved = cache.get("25");
        assert!(retrieved.is_some());
        assert!(retrieved.unwrap().contains("pikachu"));

        // Test cache miss
        assert!(cache.get("1").is_none());
    }

    #[test]
    fn test_aliases_share_one_value() {
        let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(3600));

        assert!(
            cache
                .put("charizard-data".to_string(), &["6", "charizard"])
                .is_ok()
        );

        let by_id = cache.get("6").unwrap();
        let by_name = cache.get("charizard").unwrap();
        assert!(Arc::ptr_eq(&by_id, &by_name));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let cache: TtlCache<i32> = TtlCache::new(Duration::from_secs(3600));

        assert!(cache.put(6, &["Charizard"]).is_ok());
        assert_eq!(cache.get("charizard").as_deref(), Some(&6));
        assert_eq!(cache.get("  CHARIZARD  ").as_deref(), Some(&6));
    }

    #[test]
    fn test_expired_entry_is_purged_on_read() {
        let cache: TtlCache<String> = TtlCache::new(Duration::ZERO);

        assert!(
            cache
                .put("stale".to_string(), &["6", "charizard"])
                .is_ok()
        );
        assert_eq!(cache.len(), 2);
        std::thread::sleep(Duration::from_millis(5));

        assert!(cache.get("6").is_none());
        assert_eq!(cache.len(), 1);

        cache.purge_expired();
        assert!(cache.is_empty());
        assert!(cache.get("charizard").is_none());
    }

    #[test]
    fn test_invalid_operations() {
        let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(3600));

        let no_keys: &[&str] = &[];
        assert!(cache.put("test".to_string(), no_keys).is_err());
        assert!(cache.put("test".to_string(), &["", "  "]).is_err());
        assert!(cache.get("").is_none());
    }

    #[test]
    fn test_stats_track_hits_and_misses() {
        let cache: TtlCache<i32> = TtlCache::new(Duration::from_secs(3600));

        assert!(cache.put(42, &["answer"]).is_ok());
        assert!(cache.get("answer").is_some());
        assert!(cache.get("question").is_none());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.inserts, 1);
        assert!((cache.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clear_resets_store_and_stats() {
        let cache: TtlCache<i32> = TtlCache::new(Duration::from_secs(3600));

        assert!(cache.put(1, &["one"]).is_ok());
        assert!(cache.get("one").is_some());
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_put_overwrites_existing_alias() {
        let cache: TtlCache<i32> = TtlCache::new(Duration::from_secs(3600));

        assert!(cache.put(1, &["25", "pikachu"]).is_ok());
        assert!(cache.put(2, &["25", "pikachu"]).is_ok());
        assert_eq!(cache.get("25").as_deref(), Some(&2));
        assert_eq!(cache.get("pikachu").as_deref(), Some(&2));
    }
}
