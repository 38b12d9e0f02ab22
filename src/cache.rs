//! Result cache capability and its in-memory implementation.
use async_trait::async_trait;
use log::debug;
use moka::future::Cache as MokaCache;
use moka::Expiry;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Key/value store with per-entry expiry. Values are JSON so any external
/// store (redis, memcached, ...) can back it.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<Value>;

    async fn set(&self, key: &str, value: Value, ttl: Duration);
}

#[derive(Clone)]
struct Entry {
    value: Value,
    ttl: Duration,
}

struct EntryTtl;

impl Expiry<String, Entry> for EntryTtl {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Bounded in-process store backed by moka.
#[derive(Clone)]
pub struct MemoryCache {
    inner: MokaCache<String, Entry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_capacity(1000)
    }

    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            inner: MokaCache::builder()
                .max_capacity(max_capacity)
                .expire_after(EntryTtl)
                .build(),
        }
    }

    pub async fn invalidate(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        let hit = self.inner.get(key).await.map(|e| e.value);
        debug!("cache {} for {}", if hit.is_some() { "hit" } else { "miss" }, key);
        hit
    }

    async fn set(&self, key: &str, value: Value, ttl: Duration) {
        self.inner.insert(key.to_string(), Entry { value, ttl }).await;
    }
}

static SHARED: Lazy<Arc<MemoryCache>> = Lazy::new(|| Arc::new(MemoryCache::new()));

/// Process-wide store shared by every client built with `cache_enabled`.
pub fn shared() -> Arc<MemoryCache> {
    SHARED.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_then_get() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let cache = MemoryCache::new();
            cache.set("track_x", json!({"title": "x"}), Duration::from_secs(60)).await;
            assert_eq!(cache.get("track_x").await, Some(json!({"title": "x"})));
            assert_eq!(cache.get("track_y").await, None);
        });
    }

    #[test]
    fn entries_expire() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let cache = MemoryCache::new();
            cache.set("k", json!(1), Duration::from_millis(50)).await;
            tokio::time::sleep(Duration::from_millis(150)).await;
            assert_eq!(cache.get("k").await, None);
        });
    }

    #[test]
    fn invalidate_removes_entry() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let cache = MemoryCache::new();
            cache.set("k", json!(1), Duration::from_secs(60)).await;
            cache.invalidate("k").await;
            assert_eq!(cache.get("k").await, None);
        });
    }
}
