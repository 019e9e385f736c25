//! Process-local [`SecretStore`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{last_segment, PutOptions, SecretStore, SecretStoreError};

/// One entry of an [`InMemorySecretStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredSecret {
    /// The stored value.
    pub value: String,
    /// Description given at write time.
    pub description: Option<String>,
    /// Whether the entry was written as encrypted.
    pub encrypted: bool,
}

/// A [`SecretStore`] kept in process memory.
///
/// Values are held in plain text; the `decrypt` flag of the read methods
/// has no effect. Useful for tests and local runs.
#[derive(Debug, Default)]
pub struct InMemorySecretStore {
    entries: RwLock<BTreeMap<String, StoredSecret>>,
}

impl InMemorySecretStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the full entry stored under `name`, including its metadata.
    pub async fn entry(&self, name: &str) -> Option<StoredSecret> {
        self.entries.read().await.get(name).cloned()
    }

    /// Returns the number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns `true` if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    async fn get(&self, name: &str, _decrypt: bool) -> Result<String, SecretStoreError> {
        self.entries
            .read()
            .await
            .get(name)
            .map(|entry| entry.value.clone())
            .ok_or_else(|| SecretStoreError::NotFound {
                name: name.to_string(),
            })
    }

    async fn get_by_path(
        &self,
        path: &str,
        _decrypt: bool,
    ) -> Result<BTreeMap<String, String>, SecretStoreError> {
        let prefix = format!("{}/", path.trim_end_matches('/'));
        let entries = self.entries.read().await;

        Ok(entries
            .range(prefix.clone()..)
            .take_while(|(name, _)| name.starts_with(&prefix))
            .filter(|(name, _)| !name[prefix.len()..].contains('/'))
            .map(|(name, entry)| (last_segment(name).to_string(), entry.value.clone()))
            .collect())
    }

    async fn put(
        &self,
        name: &str,
        value: &str,
        options: PutOptions,
    ) -> Result<(), SecretStoreError> {
        let mut entries = self.entries.write().await;
        if !options.overwrite && entries.contains_key(name) {
            return Err(SecretStoreError::AlreadyExists {
                name: name.to_string(),
            });
        }

        entries.insert(
            name.to_string(),
            StoredSecret {
                value: value.to_string(),
                description: options.description,
                encrypted: options.encrypted,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_entry_is_not_found() {
        let store = InMemorySecretStore::new();
        let result = store.get("/daraz/code", true).await;
        assert_eq!(
            result,
            Err(SecretStoreError::NotFound {
                name: "/daraz/code".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_put_then_get_keeps_metadata() {
        let store = InMemorySecretStore::new();
        store
            .put("/daraz/code", "abc", PutOptions::secure("Daraz oauth code"))
            .await
            .unwrap();

        assert_eq!(store.get("/daraz/code", true).await.unwrap(), "abc");
        let entry = store.entry("/daraz/code").await.unwrap();
        assert!(entry.encrypted);
        assert_eq!(entry.description.as_deref(), Some("Daraz oauth code"));
    }

    #[tokio::test]
    async fn test_put_without_overwrite_rejects_existing_entry() {
        let store = InMemorySecretStore::new();
        store
            .put("/daraz/code", "first", PutOptions::default())
            .await
            .unwrap();

        let result = store
            .put("/daraz/code", "second", PutOptions::default())
            .await;

        assert!(matches!(result, Err(SecretStoreError::AlreadyExists { .. })));
        assert_eq!(store.get("/daraz/code", false).await.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_put_with_overwrite_replaces_entry() {
        let store = InMemorySecretStore::new();
        store
            .put("/daraz/code", "first", PutOptions::secure("code"))
            .await
            .unwrap();
        store
            .put("/daraz/code", "second", PutOptions::secure("code"))
            .await
            .unwrap();

        assert_eq!(store.get("/daraz/code", true).await.unwrap(), "second");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_by_path_returns_direct_children_only() {
        let store = InMemorySecretStore::new();
        for (name, value) in [
            ("/daraz/tokens/access_token", "A"),
            ("/daraz/tokens/refresh_token", "B"),
            ("/daraz/tokens/nested/deep", "X"),
            ("/daraz/tokens-old/access_token", "Y"),
            ("/daraz/code", "C"),
        ] {
            store.put(name, value, PutOptions::secure("t")).await.unwrap();
        }

        let children = store.get_by_path("/daraz/tokens", true).await.unwrap();

        assert_eq!(children.len(), 2);
        assert_eq!(children.get("access_token").map(String::as_str), Some("A"));
        assert_eq!(children.get("refresh_token").map(String::as_str), Some("B"));
    }

    #[tokio::test]
    async fn test_get_by_path_on_empty_path_is_empty() {
        let store = InMemorySecretStore::new();
        assert!(store.get_by_path("/nothing", true).await.unwrap().is_empty());
        assert!(store.is_empty().await);
    }
}
