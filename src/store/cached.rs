//! Read-through TTL cache over a [`SecretStore`].

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{PutOptions, SecretStore, SecretStoreError};

/// Default lifetime of a cached read.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum CacheKey {
    Name { name: String, decrypt: bool },
    Path { path: String, decrypt: bool },
}

#[derive(Clone, Debug)]
enum CachedValue {
    Name(String),
    Path(BTreeMap<String, String>),
}

/// Wraps a [`SecretStore`] and caches successful reads for a fixed TTL.
///
/// Any `put` through the cache clears every cached read, so a value written
/// through this wrapper is visible to the next read. Writes made to the
/// inner store by other parties become visible once the TTL expires.
/// Failed reads are never cached.
///
/// # Example
///
/// ```rust
/// use daraz_sdk::store::{CachedSecretStore, InMemorySecretStore, PutOptions, SecretStore};
///
/// # tokio_test::block_on(async {
/// let store = CachedSecretStore::new(InMemorySecretStore::new());
/// store.put("/app/code", "abc", PutOptions::secure("code")).await.unwrap();
/// assert_eq!(store.get("/app/code", true).await.unwrap(), "abc");
/// # });
/// ```
#[derive(Debug)]
pub struct CachedSecretStore<S> {
    inner: S,
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, (Instant, CachedValue)>>,
}

impl<S: SecretStore> CachedSecretStore<S> {
    /// Wraps `inner` with the default TTL of 60 seconds.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self::with_ttl(inner, DEFAULT_CACHE_TTL)
    }

    /// Wraps `inner` with an explicit TTL. A zero TTL disables caching.
    #[must_use]
    pub fn with_ttl(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the wrapped store.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Returns the cache TTL.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Drops every cached read.
    pub async fn invalidate(&self) {
        self.entries.lock().await.clear();
    }

    async fn lookup(&self, key: &CacheKey) -> Option<CachedValue> {
        let mut entries = self.entries.lock().await;
        let fresh = entries
            .get(key)
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .map(|(_, value)| value.clone());
        if fresh.is_none() {
            entries.remove(key);
        }
        fresh
    }

    async fn remember(&self, key: CacheKey, value: CachedValue) {
        if self.ttl.is_zero() {
            return;
        }
        self.entries
            .lock()
            .await
            .insert(key, (Instant::now(), value));
    }
}

#[async_trait]
impl<S: SecretStore> SecretStore for CachedSecretStore<S> {
    async fn get(&self, name: &str, decrypt: bool) -> Result<String, SecretStoreError> {
        let key = CacheKey::Name {
            name: name.to_string(),
            decrypt,
        };
        if let Some(CachedValue::Name(value)) = self.lookup(&key).await {
            tracing::debug!(name = %name, "Secret cache hit");
            return Ok(value);
        }

        let value = self.inner.get(name, decrypt).await?;
        self.remember(key, CachedValue::Name(value.clone())).await;
        Ok(value)
    }

    async fn get_by_path(
        &self,
        path: &str,
        decrypt: bool,
    ) -> Result<BTreeMap<String, String>, SecretStoreError> {
        let key = CacheKey::Path {
            path: path.to_string(),
            decrypt,
        };
        if let Some(CachedValue::Path(values)) = self.lookup(&key).await {
            tracing::debug!(path = %path, "Secret cache hit");
            return Ok(values);
        }

        let values = self.inner.get_by_path(path, decrypt).await?;
        self.remember(key, CachedValue::Path(values.clone())).await;
        Ok(values)
    }

    async fn put(
        &self,
        name: &str,
        value: &str,
        options: PutOptions,
    ) -> Result<(), SecretStoreError> {
        let result = self.inner.put(name, value, options).await;
        self.invalidate().await;
        result
    }
}
