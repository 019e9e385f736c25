//! # Daraz Open Platform Rust SDK
//!
//! A Rust SDK for the Daraz Open Platform, providing signed API calls,
//! OAuth token lifecycle management and an order sync for seller
//! integrations.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for credentials, URLs and secret store paths
//! - HMAC-SHA256 request signing via [`signing`]
//! - An async client that signs, sends and decodes calls via [`clients`]
//! - OAuth token exchange, refresh and persistence via [`auth`]
//! - A pluggable secret store with a TTL cache via [`store`]
//! - Order listing and item sync via [`orders`]
//! - Ready-made invocation handlers via [`handlers`]
//!
//! ## Quick Start
//!
//! ```rust
//! use daraz_sdk::{AppKey, AppSecret, ClientConfig, LogLevel, ServerUrl};
//!
//! // Create configuration using the builder pattern
//! let config = ClientConfig::builder()
//!     .server_url(ServerUrl::new("https://api.daraz.com.bd/rest").unwrap())
//!     .app_key(AppKey::new("your-app-key").unwrap())
//!     .app_secret(AppSecret::new("your-app-secret").unwrap())
//!     .log_level(LogLevel::Info)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use daraz_sdk::clients::{ApiClient, ApiRequest};
//!
//! let client = ApiClient::new(config)?;
//!
//! let request = ApiRequest::get("/order/items/get").param("order_id", 12345);
//! let response = client.execute(&request, Some(&access_token)).await?;
//!
//! // API-level failures come back as data, not as errors
//! if !response.is_success() {
//!     println!("{:?}: {:?}", response.code, response.message);
//! }
//! ```
//!
//! ## OAuth Tokens
//!
//! ```rust,ignore
//! use daraz_sdk::auth::TokenSet;
//! use daraz_sdk::store::{CachedSecretStore, InMemorySecretStore};
//!
//! let store = CachedSecretStore::new(InMemorySecretStore::new());
//!
//! // Exchange the code from the OAuth redirect and persist the result
//! let tokens = TokenSet::from_authorization_code(&code, &client).await?;
//! tokens.persist_to_store(&tokens_path, &store).await?;
//!
//! // Renew later with the persisted refresh token
//! let tokens = TokenSet::from_refresh_token_in_store(&tokens_path, &store, &client).await?;
//! ```
//!
//! ## Logging
//!
//! The SDK emits [`tracing`](https://docs.rs/tracing) events and never
//! installs a subscriber. Verbosity of the per-call entries is controlled by
//! [`LogLevel`] on the client configuration:
//!
//! - `ERROR` (default): only failed calls are logged
//! - `INFO`: successful calls are logged as well
//! - `DEBUG`: like `INFO`, and the platform is asked for debug output
//!
//! ## Thread Safety
//!
//! All public types are `Send + Sync`.

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod orders;
pub mod signing;
pub mod store;

// Re-export public types at crate root for convenience
pub use config::{
    AppConfig, AppKey, AppSecret, ClientConfig, ClientConfigBuilder, LogLevel, ServerUrl,
    StorePath, SDK_VERSION,
};
pub use error::ConfigError;

// Re-export client types
pub use clients::{ApiClient, ApiError, ApiRequest, ApiResponse, FileParam, HttpMethod};

// Re-export token types
pub use auth::{TokenError, TokenSet};
