//! Integration tests for the OAuth token lifecycle.

use std::time::Duration;

use daraz_sdk::auth::{TokenError, TokenSet};
use daraz_sdk::clients::ApiClient;
use daraz_sdk::store::{CachedSecretStore, InMemorySecretStore, PutOptions, SecretStore};
use daraz_sdk::{AppKey, AppSecret, ClientConfig, ServerUrl, StorePath};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_client(server: &MockServer) -> ApiClient {
    let config = ClientConfig::builder()
        .server_url(ServerUrl::new(server.uri()).unwrap())
        .app_key(AppKey::new("123456").unwrap())
        .app_secret(AppSecret::new("secret").unwrap())
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    ApiClient::new(config).unwrap()
}

fn tokens_path() -> StorePath {
    StorePath::new("/daraz/tokens").unwrap()
}

#[tokio::test]
async fn test_authorization_code_exchange_returns_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/token/create"))
        .and(body_string_contains("good-code"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"code":"0","access_token":"A","refresh_token":"B","expires_in":604800}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);

    let tokens = TokenSet::from_authorization_code("good-code", &client)
        .await
        .unwrap();

    assert_eq!(tokens.access_token, "A");
    assert_eq!(tokens.refresh_token, "B");
}

#[tokio::test]
async fn test_rejected_code_is_missing_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/token/create"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"code":"21","message":"invalid code"}"#),
        )
        .mount(&server)
        .await;

    let client = create_client(&server);

    let result = TokenSet::from_authorization_code("expired-code", &client).await;

    match result {
        Err(TokenError::MissingField { field, code, .. }) => {
            assert_eq!(field, "access_token");
            assert_eq!(code.as_deref(), Some("21"));
        }
        other => panic!("expected MissingField, got {other:?}"),
    }
}

#[tokio::test]
async fn test_refresh_from_store_then_persist() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/token/refresh"))
        .and(body_string_contains("name=\"refresh_token\""))
        .and(body_string_contains("old-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"code":"0","access_token":"new-access","refresh_token":"new-refresh"}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let store = CachedSecretStore::new(InMemorySecretStore::new());
    TokenSet::new("old-access", "old-refresh")
        .persist_to_store(&tokens_path(), &store)
        .await
        .unwrap();

    let tokens = TokenSet::from_refresh_token_in_store(&tokens_path(), &store, &client)
        .await
        .unwrap();
    tokens.persist_to_store(&tokens_path(), &store).await.unwrap();

    let loaded = TokenSet::load_from_store(&tokens_path(), &store)
        .await
        .unwrap();
    assert_eq!(loaded, TokenSet::new("new-access", "new-refresh"));
}

#[tokio::test]
async fn test_refresh_without_stored_token_fails_before_any_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"code":"0"}"#))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let store = InMemorySecretStore::new();

    let result = TokenSet::from_refresh_token_in_store(&tokens_path(), &store, &client).await;

    assert!(matches!(result, Err(TokenError::Store(_))));
}

#[tokio::test]
async fn test_persist_is_visible_through_cache() {
    let store = CachedSecretStore::new(InMemorySecretStore::new());
    store
        .put(
            "/daraz/tokens/access_token",
            "stale",
            PutOptions::secure("Daraz oauth access token"),
        )
        .await
        .unwrap();
    assert_eq!(
        store.get("/daraz/tokens/access_token", true).await.unwrap(),
        "stale"
    );

    TokenSet::new("fresh", "R")
        .persist_to_store(&tokens_path(), &store)
        .await
        .unwrap();

    assert_eq!(
        store.get("/daraz/tokens/access_token", true).await.unwrap(),
        "fresh"
    );
}
