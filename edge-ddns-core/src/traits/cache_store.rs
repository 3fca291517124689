//! 缓存抽象 Trait

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::CoreResult;

/// Key/value cache with per-entry TTL.
///
/// Used only as an advisory "last applied IP" record: a stale or missing
/// entry costs one extra provider read, never a wrong answer.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read a value; expired entries read as `None`.
    async fn get(&self, key: &str) -> CoreResult<Option<String>>;

    /// Write a value that expires after `ttl`.
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> CoreResult<()>;
}

struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-process TTL cache.
///
/// Expired entries are dropped lazily on read and swept on write.
#[derive(Clone, Default)]
pub struct InMemoryCacheStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl InMemoryCacheStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }
        // 过期：升级为写锁删除（期间可能已被覆盖，需再次判断）
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| e.expires_at <= now) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> CoreResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, e| e.expires_at > now);
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }
}
