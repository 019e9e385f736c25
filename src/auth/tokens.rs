//! OAuth token set for the Daraz Open Platform.
//!
//! A [`TokenSet`] is obtained by exchanging an authorization code, renewed
//! with its refresh token, and persisted between invocations in a
//! [`SecretStore`] as two entries below one [`StorePath`]:
//!
//! ```text
//! {path}/access_token
//! {path}/refresh_token
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::auth::TokenError;
use crate::clients::{ApiClient, ApiRequest, ApiResponse};
use crate::config::StorePath;
use crate::store::{PutOptions, SecretStore, SecretStoreError};

/// Endpoint exchanging an authorization code for tokens.
pub const TOKEN_CREATE_PATH: &str = "/auth/token/create";
/// Endpoint exchanging a refresh token for new tokens.
pub const TOKEN_REFRESH_PATH: &str = "/auth/token/refresh";

/// Store key (and response field) of the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Store key (and response field) of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

const ACCESS_TOKEN_DESCRIPTION: &str = "Daraz oauth access token";
const REFRESH_TOKEN_DESCRIPTION: &str = "Daraz oauth refresh token";

/// An access token and the refresh token that renews it.
///
/// Serializes to `{"access_token": ..., "refresh_token": ...}`. The `Debug`
/// output masks both values.
///
/// # Example
///
/// ```rust
/// use daraz_sdk::auth::TokenSet;
///
/// let tokens = TokenSet::new("A", "B");
/// assert_eq!(
///     serde_json::to_string(&tokens).unwrap(),
///     r#"{"access_token":"A","refresh_token":"B"}"#
/// );
/// assert!(!format!("{tokens:?}").contains('A'));
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    /// Bearer token for API calls.
    pub access_token: String,
    /// Token used to obtain a new [`TokenSet`].
    pub refresh_token: String,
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field("access_token", &"*****")
            .field("refresh_token", &"*****")
            .finish()
    }
}

impl TokenSet {
    /// Creates a token set from its two tokens.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Extracts the tokens from a token endpoint response.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::MissingField`] if either token is absent or not
    /// a string.
    pub fn from_response(response: &ApiResponse) -> Result<Self, TokenError> {
        let field = |name: &'static str| {
            response
                .body_str(name)
                .map(str::to_string)
                .ok_or_else(|| TokenError::MissingField {
                    field: name,
                    code: response.code.clone(),
                    message: response.message.clone(),
                })
        };

        Ok(Self {
            access_token: field(ACCESS_TOKEN_KEY)?,
            refresh_token: field(REFRESH_TOKEN_KEY)?,
        })
    }

    /// Exchanges an authorization code for a token set.
    ///
    /// Calls `POST /auth/token/create` without a bearer token.
    ///
    /// # Errors
    ///
    /// - [`TokenError::Api`] if the call fails at the transport level
    /// - [`TokenError::MissingField`] if the platform rejects the code
    pub async fn from_authorization_code(
        code: &str,
        client: &ApiClient,
    ) -> Result<Self, TokenError> {
        let request = ApiRequest::post(TOKEN_CREATE_PATH).param("code", code);
        let response = client.execute(&request, None).await?;
        Self::from_response(&response)
    }

    /// Exchanges a refresh token for a new token set.
    ///
    /// Calls `POST /auth/token/refresh` without a bearer token.
    ///
    /// # Errors
    ///
    /// - [`TokenError::Api`] if the call fails at the transport level
    /// - [`TokenError::MissingField`] if the platform rejects the token
    pub async fn from_refresh_token(
        refresh_token: &str,
        client: &ApiClient,
    ) -> Result<Self, TokenError> {
        let request = ApiRequest::post(TOKEN_REFRESH_PATH).param(REFRESH_TOKEN_KEY, refresh_token);
        let response = client.execute(&request, None).await?;
        Self::from_response(&response)
    }

    /// Reads `{path}/refresh_token` from the store and refreshes with it.
    ///
    /// # Errors
    ///
    /// - [`TokenError::Store`] if the refresh token cannot be read
    /// - any error of [`from_refresh_token`](Self::from_refresh_token)
    pub async fn from_refresh_token_in_store<S>(
        path: &StorePath,
        store: &S,
        client: &ApiClient,
    ) -> Result<Self, TokenError>
    where
        S: SecretStore + ?Sized,
    {
        let refresh_token = store.get(&path.child(REFRESH_TOKEN_KEY), true).await?;
        Self::from_refresh_token(&refresh_token, client).await
    }

    /// Loads a token set persisted below `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Store`] with
    /// [`SecretStoreError::NotFound`] if either entry is missing.
    pub async fn load_from_store<S>(path: &StorePath, store: &S) -> Result<Self, TokenError>
    where
        S: SecretStore + ?Sized,
    {
        let mut entries = store.get_by_path(path.as_ref(), true).await?;
        let mut take = |key: &str| {
            entries.remove(key).ok_or_else(|| SecretStoreError::NotFound {
                name: path.child(key),
            })
        };

        Ok(Self {
            access_token: take(ACCESS_TOKEN_KEY)?,
            refresh_token: take(REFRESH_TOKEN_KEY)?,
        })
    }

    /// Persists both tokens below `path` as encrypted entries, replacing any
    /// previous values.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Store`] if a write fails.
    pub async fn persist_to_store<S>(&self, path: &StorePath, store: &S) -> Result<(), TokenError>
    where
        S: SecretStore + ?Sized,
    {
        store
            .put(
                &path.child(ACCESS_TOKEN_KEY),
                &self.access_token,
                PutOptions::secure(ACCESS_TOKEN_DESCRIPTION),
            )
            .await?;
        store
            .put(
                &path.child(REFRESH_TOKEN_KEY),
                &self.refresh_token,
                PutOptions::secure(REFRESH_TOKEN_DESCRIPTION),
            )
            .await?;

        tracing::info!(path = %path, "Persisted Daraz oauth tokens");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemorySecretStore;
    use serde_json::json;

    fn tokens_path() -> StorePath {
        StorePath::new("/daraz/tokens").unwrap()
    }

    #[test]
    fn test_from_response_extracts_tokens() {
        let response = ApiResponse::from_body(json!({
            "code": "0",
            "access_token": "A",
            "refresh_token": "B",
            "expires_in": 604_800
        }));

        let tokens = TokenSet::from_response(&response).unwrap();
        assert_eq!(tokens, TokenSet::new("A", "B"));
    }

    #[test]
    fn test_from_response_on_api_error_is_missing_field() {
        let response = ApiResponse::from_body(json!({"code": "21", "message": "invalid code"}));

        let error = TokenSet::from_response(&response).unwrap_err();
        match error {
            TokenError::MissingField {
                field,
                code,
                message,
            } => {
                assert_eq!(field, "access_token");
                assert_eq!(code.as_deref(), Some("21"));
                assert_eq!(message.as_deref(), Some("invalid code"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_response_rejects_non_string_token() {
        let response = ApiResponse::from_body(json!({"access_token": "A", "refresh_token": 5}));

        assert!(matches!(
            TokenSet::from_response(&response),
            Err(TokenError::MissingField {
                field: "refresh_token",
                ..
            })
        ));
    }

    #[test]
    fn test_debug_masks_tokens() {
        let debug = format!("{:?}", TokenSet::new("secret-access", "secret-refresh"));
        assert!(!debug.contains("secret-access"));
        assert!(!debug.contains("secret-refresh"));
    }

    #[tokio::test]
    async fn test_persist_then_load_round_trip() {
        let store = InMemorySecretStore::new();
        let tokens = TokenSet::new("A", "B");

        tokens.persist_to_store(&tokens_path(), &store).await.unwrap();
        let loaded = TokenSet::load_from_store(&tokens_path(), &store)
            .await
            .unwrap();

        assert_eq!(loaded, tokens);
    }

    #[tokio::test]
    async fn test_persist_writes_encrypted_entries_with_descriptions() {
        let store = InMemorySecretStore::new();
        TokenSet::new("A", "B")
            .persist_to_store(&tokens_path(), &store)
            .await
            .unwrap();

        let access = store.entry("/daraz/tokens/access_token").await.unwrap();
        assert!(access.encrypted);
        assert_eq!(
            access.description.as_deref(),
            Some("Daraz oauth access token")
        );

        let refresh = store.entry("/daraz/tokens/refresh_token").await.unwrap();
        assert_eq!(refresh.value, "B");
        assert_eq!(
            refresh.description.as_deref(),
            Some("Daraz oauth refresh token")
        );
    }

    #[tokio::test]
    async fn test_persist_overwrites_previous_tokens() {
        let store = InMemorySecretStore::new();
        TokenSet::new("A", "B")
            .persist_to_store(&tokens_path(), &store)
            .await
            .unwrap();
        TokenSet::new("A2", "B2")
            .persist_to_store(&tokens_path(), &store)
            .await
            .unwrap();

        let loaded = TokenSet::load_from_store(&tokens_path(), &store)
            .await
            .unwrap();
        assert_eq!(loaded, TokenSet::new("A2", "B2"));
    }

    #[tokio::test]
    async fn test_load_with_missing_refresh_token_is_not_found() {
        let store = InMemorySecretStore::new();
        store
            .put(
                "/daraz/tokens/access_token",
                "A",
                PutOptions::secure("Daraz oauth access token"),
            )
            .await
            .unwrap();

        let result = TokenSet::load_from_store(&tokens_path(), &store).await;

        assert!(matches!(
            result,
            Err(TokenError::Store(SecretStoreError::NotFound { ref name }))
                if name == "/daraz/tokens/refresh_token"
        ));
    }
}
