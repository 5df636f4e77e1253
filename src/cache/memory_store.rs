use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::token::CachedToken;
use crate::cache::token_store::TokenStore;

/// Process-local token store with explicit expiry tracking.
///
/// Stands in for an external TTL-capable store (Redis and the like) when the
/// client runs on its own; every entry carries its own deadline and is
/// filtered out on read once that deadline passes.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    inner: Arc<RwLock<HashMap<String, CachedToken>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Drop every expired entry, returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut map = self.inner.write().await;
        let before = map.len();
        map.retain(|_, token| !token.is_expired());
        let removed = before - map.len();
        if removed > 0 {
            debug!(removed, "purged expired tokens");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

impl TokenStore for MemoryTokenStore {
    /// Get token if it exists and is not expired
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.inner.read().await;
        Ok(map
            .get(key)
            .filter(|token| !token.is_expired())
            .map(|token| token.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()> {
        let mut map = self.inner.write().await;
        map.insert(key.to_owned(), CachedToken::new(value.to_owned(), ttl_seconds));
        Ok(())
    }
}
