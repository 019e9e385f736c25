//! Handler-level configuration loaded from the environment.

use std::time::Duration;

use chrono::{DateTime, FixedOffset};

use super::{AppKey, AppSecret, ClientConfig, LogLevel, ServerUrl, StorePath};
use crate::error::ConfigError;

/// Orders created after this instant are synced unless overridden.
pub const DEFAULT_ORDERS_CREATED_AFTER: &str = "2021-01-01T00:00:00+06:00";

/// Settings shared by the invocation handlers.
///
/// `AppConfig` bundles the [`ClientConfig`] with the secret store locations
/// for the token pair and the last authorization code, plus the cutoff used
/// by the order sync.
///
/// # Environment
///
/// | Variable                | Required | Meaning                                  |
/// |-------------------------|----------|------------------------------------------|
/// | `API_URL`               | yes      | Open Platform server URL                 |
/// | `APP_KEY`               | yes      | App key                                  |
/// | `APP_SECRET`            | yes      | App secret                               |
/// | `APP_TOKENS_SSM_PATH`   | yes      | Parent path of the token pair            |
/// | `APP_CODE_SSM_PATH`     | yes      | Entry holding the last OAuth code        |
/// | `LOG_LEVEL`             | no       | `DEBUG`, `INFO` or `ERROR`               |
/// | `API_TIMEOUT_SECS`      | no       | Per-call timeout in seconds              |
/// | `ORDERS_CREATED_AFTER`  | no       | ISO-8601 cutoff for the order sync       |
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use daraz_sdk::AppConfig;
///
/// let env: HashMap<&str, &str> = [
///     ("API_URL", "https://api.daraz.com.bd/rest"),
///     ("APP_KEY", "123456"),
///     ("APP_SECRET", "secret"),
///     ("APP_TOKENS_SSM_PATH", "/daraz/tokens"),
///     ("APP_CODE_SSM_PATH", "/daraz/code"),
/// ]
/// .into_iter()
/// .collect();
///
/// let config = AppConfig::from_lookup(|key| env.get(key).map(|v| (*v).to_string())).unwrap();
/// assert_eq!(config.tokens_path().as_ref(), "/daraz/tokens");
/// ```
#[derive(Clone, Debug)]
pub struct AppConfig {
    client: ClientConfig,
    tokens_path: StorePath,
    code_path: StorePath,
    orders_created_after: DateTime<FixedOffset>,
}

impl AppConfig {
    /// Assembles an `AppConfig` from already validated parts.
    #[must_use]
    pub const fn new(
        client: ClientConfig,
        tokens_path: StorePath,
        code_path: StorePath,
        orders_created_after: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            client,
            tokens_path,
            code_path,
            orders_created_after,
        }
    }

    /// Loads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or any
    /// value fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required key is missing or any value
    /// fails validation.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::MissingRequiredField { field: key })
        };

        let mut builder = ClientConfig::builder()
            .server_url(ServerUrl::new(required("API_URL")?)?)
            .app_key(AppKey::new(required("APP_KEY")?)?)
            .app_secret(AppSecret::new(required("APP_SECRET")?)?);

        if let Some(level) = lookup("LOG_LEVEL") {
            builder = builder.log_level(level.parse::<LogLevel>()?);
        }

        if let Some(secs) = lookup("API_TIMEOUT_SECS") {
            let secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout { value: secs.clone() })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let created_after = lookup("ORDERS_CREATED_AFTER")
            .unwrap_or_else(|| DEFAULT_ORDERS_CREATED_AFTER.to_string());

        Ok(Self {
            client: builder.build()?,
            tokens_path: StorePath::new(required("APP_TOKENS_SSM_PATH")?)?,
            code_path: StorePath::new(required("APP_CODE_SSM_PATH")?)?,
            orders_created_after: parse_timestamp(&created_after)?,
        })
    }

    /// Returns the API client configuration.
    #[must_use]
    pub const fn client(&self) -> &ClientConfig {
        &self.client
    }

    /// Returns the parent path of the stored token pair.
    #[must_use]
    pub const fn tokens_path(&self) -> &StorePath {
        &self.tokens_path
    }

    /// Returns the entry that records the last authorization code.
    #[must_use]
    pub const fn code_path(&self) -> &StorePath {
        &self.code_path
    }

    /// Returns the order sync cutoff.
    #[must_use]
    pub const fn orders_created_after(&self) -> &DateTime<FixedOffset> {
        &self.orders_created_after
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, ConfigError> {
    DateTime::parse_from_rfc3339(value.trim()).map_err(|_| ConfigError::InvalidTimestamp {
        value: value.to_string(),
    })
}
