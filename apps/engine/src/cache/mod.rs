//! Analysis Cache — content-addressable memoization around the whole
//! pipeline, so identical inputs never pay for a second judge invocation.
//!
//! An explicitly constructed service, injected where it is used: bounded
//! capacity with oldest-insertion eviction, a TTL checked on lookup, and
//! single-flight coalescing so concurrent identical requests share one
//! in-flight computation. A failed computation caches nothing; the next
//! caller retries.

pub mod key;

pub use key::CacheKey;

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::sync::OnceCell;
use tracing::debug;

use crate::errors::EngineError;

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

struct Store<V> {
    entries: HashMap<CacheKey, CacheEntry<V>>,
    /// Insertion order for eviction.
    order: VecDeque<CacheKey>,
}

pub struct AnalysisCache<V> {
    capacity: usize,
    ttl: Duration,
    store: Mutex<Store<V>>,
    inflight: tokio::sync::Mutex<HashMap<CacheKey, Arc<OnceCell<V>>>>,
}

impl<V: Clone> AnalysisCache<V> {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            ttl,
            store: Mutex::new(Store {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            inflight: tokio::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Returns the live value for `key`, removing it first if expired.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        let mut store = self.store.lock().expect("cache store lock poisoned");
        let expired = match store.entries.get(key) {
            Some(entry) => {
                if entry.inserted_at.elapsed() <= self.ttl {
                    return Some(entry.value.clone());
                }
                true
            }
            None => false,
        };
        if expired {
            store.entries.remove(key);
            store.order.retain(|k| k != key);
        }
        None
    }

    /// Stores unconditionally, evicting oldest insertions over capacity.
    pub fn insert(&self, key: CacheKey, value: V) {
        let mut store = self.store.lock().expect("cache store lock poisoned");
        if store.entries.contains_key(&key) {
            store.order.retain(|k| k != &key);
        }
        while store.entries.len() >= self.capacity && !store.order.is_empty() {
            if let Some(oldest) = store.order.pop_front() {
                store.entries.remove(&oldest);
            }
        }
        store.order.push_back(key.clone());
        store.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.store
            .lock()
            .expect("cache store lock poisoned")
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cached value for `key`, or runs `compute` and stores its
    /// result. Concurrent callers for the same key coalesce onto a single
    /// computation; a failed computation is not stored, so a later caller
    /// computes again.
    pub async fn get_or_compute<F, Fut>(&self, key: CacheKey, compute: F) -> Result<V, EngineError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, EngineError>>,
    {
        if let Some(hit) = self.get(&key) {
            debug!(cache_key = %key, "analysis cache hit");
            return Ok(hit);
        }
        debug!(cache_key = %key, "analysis cache miss");

        let cell = {
            let mut inflight = self.inflight.lock().await;
            inflight
                .entry(key.clone())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let result = cell
            .get_or_try_init(|| async { compute().await })
            .await
            .cloned();

        // Store before releasing the in-flight slot, so a caller arriving
        // between the two sees either the slot or the stored value.
        if let Ok(value) = &result {
            self.insert(key.clone(), value.clone());
        }
        {
            let mut inflight = self.inflight.lock().await;
            inflight.remove(&key);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn key(text: &str) -> CacheKey {
        CacheKey::for_value(&text).unwrap()
    }

    fn cache() -> AnalysisCache<String> {
        AnalysisCache::new(8, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_second_call_does_not_recompute() {
        let cache = cache();
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let value = cache
                .get_or_compute(key("k"), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok("report".to_string())
                })
                .await
                .unwrap();
            assert_eq!(value, "report");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_different_keys_compute_independently() {
        let cache = cache();
        let calls = AtomicUsize::new(0);

        for name in ["a", "b"] {
            cache
                .get_or_compute(key(name), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(name.to_string())
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_computation_is_not_cached() {
        let cache = cache();
        let calls = AtomicUsize::new(0);

        let first: Result<String, _> = cache
            .get_or_compute(key("k"), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(EngineError::AllBackendsFailed)
            })
            .await;
        assert!(first.is_err());

        let second = cache
            .get_or_compute(key("k"), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("recovered".to_string())
            })
            .await
            .unwrap();
        assert_eq!(second, "recovered");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_identical_requests_coalesce() {
        let cache = Arc::new(cache());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_compute(key("shared"), || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok("joint".to_string())
                    })
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), "joint");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_ttl_expiry_is_a_miss() {
        let cache = AnalysisCache::new(8, Duration::from_millis(10));
        cache.insert(key("k"), "stale".to_string());
        assert_eq!(cache.get(&key("k")), Some("stale".to_string()));

        tokio::time::sleep(Duration::from_millis(25)).await;
        assert_eq!(cache.get(&key("k")), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_capacity_evicts_oldest_insertion() {
        let cache = AnalysisCache::new(2, Duration::from_secs(60));
        cache.insert(key("first"), "1".to_string());
        cache.insert(key("second"), "2".to_string());
        cache.insert(key("third"), "3".to_string());

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&key("first")), None);
        assert_eq!(cache.get(&key("second")), Some("2".to_string()));
        assert_eq!(cache.get(&key("third")), Some("3".to_string()));
    }

    #[test]
    fn test_reinsert_refreshes_without_duplicating_order() {
        let cache = AnalysisCache::new(2, Duration::from_secs(60));
        cache.insert(key("a"), "1".to_string());
        cache.insert(key("a"), "2".to_string());
        cache.insert(key("b"), "3".to_string());
        cache.insert(key("c"), "4".to_string());

        // "a" was re-inserted, so "b" is not the only survivor.
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&key("a")), None);
        assert_eq!(cache.get(&key("b")), Some("3".to_string()));
        assert_eq!(cache.get(&key("c")), Some("4".to_string()));
    }
}
