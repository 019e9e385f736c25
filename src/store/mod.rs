//! Secret store abstraction for OAuth tokens and authorization codes.
//!
//! Tokens outlive a single invocation, so they are persisted in a
//! hierarchical key/value secret store. Names are `/`-separated paths; a
//! token set lives at `{path}/access_token` and `{path}/refresh_token`.
//!
//! # Overview
//!
//! - [`SecretStore`]: the async capability (get, get by path, put)
//! - [`PutOptions`]: description, encryption and overwrite flags for writes
//! - [`InMemorySecretStore`]: a process-local store
//! - [`CachedSecretStore`]: a read-through TTL cache over any store
//!
//! # Example
//!
//! ```rust
//! use daraz_sdk::store::{InMemorySecretStore, PutOptions, SecretStore};
//!
//! # tokio_test::block_on(async {
//! let store = InMemorySecretStore::new();
//! store
//!     .put("/daraz/tokens/access_token", "A", PutOptions::secure("Daraz oauth access token"))
//!     .await
//!     .unwrap();
//!
//! let value = store.get("/daraz/tokens/access_token", true).await.unwrap();
//! assert_eq!(value, "A");
//! # });
//! ```

mod cached;
mod memory;

pub use cached::{CachedSecretStore, DEFAULT_CACHE_TTL};
pub use memory::{InMemorySecretStore, StoredSecret};

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by a [`SecretStore`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SecretStoreError {
    /// No entry exists under the requested name.
    #[error("Secret '{name}' not found")]
    NotFound {
        /// The requested name.
        name: String,
    },

    /// A write without `overwrite` hit an existing entry.
    #[error("Secret '{name}' already exists and overwrite was not requested")]
    AlreadyExists {
        /// The name that was written.
        name: String,
    },

    /// The backing service failed.
    #[error("Secret store backend error: {message}")]
    Backend {
        /// Description of the failure.
        message: String,
    },
}

/// Options for [`SecretStore::put`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PutOptions {
    /// Human-readable description stored with the entry.
    pub description: Option<String>,
    /// Whether the value is stored encrypted.
    pub encrypted: bool,
    /// Whether an existing entry may be replaced.
    pub overwrite: bool,
}

impl PutOptions {
    /// Encrypted, overwriting write with a description.
    ///
    /// This is how tokens and authorization codes are persisted.
    #[must_use]
    pub fn secure(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            encrypted: true,
            overwrite: true,
        }
    }
}

/// Hierarchical key/value secret store.
///
/// Implementations must be safe to share between tasks.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Reads one entry.
    ///
    /// # Errors
    ///
    /// Returns [`SecretStoreError::NotFound`] if `name` has no entry.
    async fn get(&self, name: &str, decrypt: bool) -> Result<String, SecretStoreError>;

    /// Reads the direct children of `path`, keyed by their last segment.
    ///
    /// An empty map is returned when `path` has no children.
    ///
    /// # Errors
    ///
    /// Returns [`SecretStoreError::Backend`] if the store cannot be read.
    async fn get_by_path(
        &self,
        path: &str,
        decrypt: bool,
    ) -> Result<BTreeMap<String, String>, SecretStoreError>;

    /// Writes one entry.
    ///
    /// # Errors
    ///
    /// Returns [`SecretStoreError::AlreadyExists`] if an entry exists and
    /// `options.overwrite` is `false`.
    async fn put(
        &self,
        name: &str,
        value: &str,
        options: PutOptions,
    ) -> Result<(), SecretStoreError>;
}

/// Returns the last segment of a `/`-separated name.
pub(crate) fn last_segment(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

// Verify store types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SecretStoreError>();
    assert_send_sync::<InMemorySecretStore>();
    assert_send_sync::<CachedSecretStore<InMemorySecretStore>>();
};
