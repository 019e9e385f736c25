//! Invocation handlers for a serverless Daraz integration.
//!
//! Each handler is one self-contained invocation: it takes the application
//! configuration, a secret store and an [`ApiClient`], does its work, and
//! returns a serializable result. Routing requests to handlers is left to
//! the hosting runtime.
//!
//! # Overview
//!
//! - [`oauth_callback`]: exchanges the authorization code from the OAuth
//!   redirect and persists the tokens and the code
//! - [`refresh_tokens`]: renews the persisted tokens (run on a schedule)
//! - [`sync_orders`]: records the items of recent orders (run on a schedule)
//!
//! # Example
//!
//! ```rust,ignore
//! use daraz_sdk::clients::ApiClient;
//! use daraz_sdk::handlers;
//! use daraz_sdk::store::{CachedSecretStore, InMemorySecretStore};
//! use daraz_sdk::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! let client = ApiClient::new(config.client().clone())?;
//! let store = CachedSecretStore::new(InMemorySecretStore::new());
//!
//! let status = handlers::refresh_tokens(&config, &store, &client).await?;
//! assert_eq!(status.status, "success");
//! ```

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::auth::{TokenError, TokenSet};
use crate::clients::ApiClient;
use crate::config::AppConfig;
use crate::orders::{self, SyncError};
use crate::store::{PutOptions, SecretStore, SecretStoreError};

/// Query parameter carrying the authorization code.
pub const CODE_PARAM: &str = "code";

const CODE_DESCRIPTION: &str = "Daraz oauth code";

/// Errors returned by the handlers.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The OAuth callback carried no authorization code.
    #[error("Authorization code is not present in the callback query")]
    MissingCode,

    /// Obtaining, loading or persisting tokens failed.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// The secret store failed.
    #[error(transparent)]
    Store(#[from] SecretStoreError),

    /// The order sync failed.
    #[error(transparent)]
    Sync(#[from] SyncError),
}

// Verify HandlerError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HandlerError>();
};

/// Result of a handler that has nothing else to report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HandlerStatus {
    /// Always `"success"`.
    pub status: &'static str,
}

impl HandlerStatus {
    /// The successful status.
    #[must_use]
    pub const fn success() -> Self {
        Self { status: "success" }
    }
}

/// Handles the OAuth redirect.
///
/// Exchanges the `code` query parameter for tokens, persists them below the
/// configured tokens path, stores the code itself at the configured code
/// path, and returns the tokens.
///
/// # Errors
///
/// - [`HandlerError::MissingCode`] if `code` is absent or empty
/// - [`HandlerError::Token`] if the exchange or the token write fails
/// - [`HandlerError::Store`] if the code cannot be stored
pub async fn oauth_callback<S>(
    config: &AppConfig,
    store: &S,
    client: &ApiClient,
    query: &HashMap<String, String>,
) -> Result<TokenSet, HandlerError>
where
    S: SecretStore + ?Sized,
{
    let code = query
        .get(CODE_PARAM)
        .map(String::as_str)
        .filter(|code| !code.is_empty())
        .ok_or(HandlerError::MissingCode)?;

    let tokens = TokenSet::from_authorization_code(code, client).await?;
    tokens.persist_to_store(config.tokens_path(), store).await?;

    store
        .put(
            config.code_path().as_ref(),
            code,
            PutOptions::secure(CODE_DESCRIPTION),
        )
        .await?;

    tracing::info!(code_path = %config.code_path(), "Stored Daraz oauth code");
    Ok(tokens)
}

/// Renews the persisted tokens with the persisted refresh token.
///
/// # Errors
///
/// Returns [`HandlerError::Token`] if reading, refreshing or writing the
/// tokens fails.
pub async fn refresh_tokens<S>(
    config: &AppConfig,
    store: &S,
    client: &ApiClient,
) -> Result<HandlerStatus, HandlerError>
where
    S: SecretStore + ?Sized,
{
    let tokens =
        TokenSet::from_refresh_token_in_store(config.tokens_path(), store, client).await?;
    tracing::debug!(?tokens, "Refreshed Daraz oauth tokens");

    tokens.persist_to_store(config.tokens_path(), store).await?;
    Ok(HandlerStatus::success())
}

/// Records the items of every order created after the configured cutoff.
///
/// # Errors
///
/// - [`HandlerError::Token`] if the tokens cannot be loaded
/// - [`HandlerError::Sync`] if the sync ends early
pub async fn sync_orders<S>(
    config: &AppConfig,
    store: &S,
    client: &ApiClient,
) -> Result<HandlerStatus, HandlerError>
where
    S: SecretStore + ?Sized,
{
    let tokens = TokenSet::load_from_store(config.tokens_path(), store).await?;

    let report = orders::sync_orders(
        client,
        &tokens.access_token,
        config.orders_created_after(),
    )
    .await?;

    tracing::info!(
        items = report.items.len(),
        skipped = report.skipped.len(),
        "Daraz order sync finished"
    );
    Ok(HandlerStatus::success())
}
