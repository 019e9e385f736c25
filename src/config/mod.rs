//! Configuration types for the Daraz SDK.
//!
//! This module provides the configuration types used to construct an
//! [`ApiClient`](crate::clients::ApiClient) and to drive the invocation
//! handlers.
//!
//! # Overview
//!
//! - [`ClientConfig`]: credentials, server URL, timeout and log level for one client
//! - [`ClientConfigBuilder`]: a builder for constructing [`ClientConfig`] instances
//! - [`AppConfig`]: handler-level settings (secret store paths, order cutoff),
//!   loadable from environment variables
//! - [`AppKey`], [`AppSecret`], [`ServerUrl`], [`StorePath`]: validated newtypes
//! - [`LogLevel`]: client verbosity
//!
//! # Example
//!
//! ```rust
//! use daraz_sdk::{AppKey, AppSecret, ClientConfig, LogLevel, ServerUrl};
//!
//! let config = ClientConfig::builder()
//!     .server_url(ServerUrl::new("https://api.daraz.com.bd/rest").unwrap())
//!     .app_key(AppKey::new("123456").unwrap())
//!     .app_secret(AppSecret::new("my-secret").unwrap())
//!     .log_level(LogLevel::Info)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.log_level(), LogLevel::Info);
//! ```

mod app;
mod log_level;
mod newtypes;

pub use app::{AppConfig, DEFAULT_ORDERS_CREATED_AFTER};
pub use log_level::LogLevel;
pub use newtypes::{AppKey, AppSecret, ServerUrl, StorePath};

use std::time::Duration;

use crate::error::ConfigError;

/// Version tag sent as the `partner_id` system parameter.
pub const SDK_VERSION: &str = concat!("daraz-rust-sdk-", env!("CARGO_PKG_VERSION"));

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for one [`ApiClient`](crate::clients::ApiClient).
///
/// The log level lives here rather than in process-wide state, so two
/// clients with different verbosity can coexist and tests can exercise
/// every logging branch deterministically.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    server_url: ServerUrl,
    app_key: AppKey,
    app_secret: AppSecret,
    timeout: Duration,
    log_level: LogLevel,
    partner_id: String,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the server URL.
    #[must_use]
    pub const fn server_url(&self) -> &ServerUrl {
        &self.server_url
    }

    /// Returns the app key.
    #[must_use]
    pub const fn app_key(&self) -> &AppKey {
        &self.app_key
    }

    /// Returns the app secret used for signing.
    #[must_use]
    pub const fn app_secret(&self) -> &AppSecret {
        &self.app_secret
    }

    /// Returns the per-call timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the client log level.
    #[must_use]
    pub const fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Returns the version tag sent as `partner_id`.
    #[must_use]
    pub fn partner_id(&self) -> &str {
        &self.partner_id
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// Required fields are `server_url`, `app_key` and `app_secret`.
///
/// # Defaults
///
/// - `timeout`: 30 seconds
/// - `log_level`: [`LogLevel::Error`]
/// - `partner_id`: [`SDK_VERSION`]
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    server_url: Option<ServerUrl>,
    app_key: Option<AppKey>,
    app_secret: Option<AppSecret>,
    timeout: Option<Duration>,
    log_level: Option<LogLevel>,
    partner_id: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the server URL (required).
    #[must_use]
    pub fn server_url(mut self, url: ServerUrl) -> Self {
        self.server_url = Some(url);
        self
    }

    /// Sets the app key (required).
    #[must_use]
    pub fn app_key(mut self, key: AppKey) -> Self {
        self.app_key = Some(key);
        self
    }

    /// Sets the app secret (required).
    #[must_use]
    pub fn app_secret(mut self, secret: AppSecret) -> Self {
        self.app_secret = Some(secret);
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the client log level.
    #[must_use]
    pub const fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Overrides the version tag sent as `partner_id`.
    #[must_use]
    pub fn partner_id(mut self, partner_id: impl Into<String>) -> Self {
        self.partner_id = Some(partner_id.into());
        self
    }

    /// Builds the [`ClientConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `server_url`,
    /// `app_key` or `app_secret` are not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let server_url = self
            .server_url
            .ok_or(ConfigError::MissingRequiredField {
                field: "server_url",
            })?;
        let app_key = self
            .app_key
            .ok_or(ConfigError::MissingRequiredField { field: "app_key" })?;
        let app_secret = self
            .app_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "app_secret",
            })?;

        Ok(ClientConfig {
            server_url,
            app_key,
            app_secret,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            log_level: self.log_level.unwrap_or_default(),
            partner_id: self
                .partner_id
                .unwrap_or_else(|| SDK_VERSION.to_string()),
        })
    }
}
