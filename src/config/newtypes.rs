//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Daraz app key.
///
/// This newtype ensures the app key is non-empty and provides type safety
/// to prevent accidental misuse of raw strings.
///
/// # Example
///
/// ```rust
/// use daraz_sdk::AppKey;
///
/// let key = AppKey::new("123456").unwrap();
/// assert_eq!(key.as_ref(), "123456");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppKey(String);

impl AppKey {
    /// Creates a new validated app key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAppKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyAppKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for AppKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated Daraz app secret.
///
/// The secret is the HMAC key used to sign every request. Its `Debug`
/// implementation masks the value, displaying only `AppSecret(*****)`.
///
/// # Example
///
/// ```rust
/// use daraz_sdk::AppSecret;
///
/// let secret = AppSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "AppSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AppSecret(String);

impl AppSecret {
    /// Creates a new validated app secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAppSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyAppSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for AppSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppSecret(*****)")
    }
}

/// A validated Open Platform server URL.
///
/// The URL is the prefix every API path is appended to, e.g.
/// `https://api.daraz.com.bd/rest`. A trailing slash is stripped so that
/// `server_url + "/orders/get"` never produces a double slash.
///
/// # Example
///
/// ```rust
/// use daraz_sdk::ServerUrl;
///
/// let url = ServerUrl::new("https://api.daraz.com.bd/rest/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.daraz.com.bd/rest");
/// assert_eq!(url.host_name(), Some("api.daraz.com.bd"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerUrl {
    url: String,
    host_start: usize,
    host_end: usize,
}

impl ServerUrl {
    /// Creates a new validated server URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidServerUrl`] if the URL has no scheme,
    /// a non-HTTP scheme, or an empty host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidServerUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(invalid());
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            host_start,
            host_end,
        })
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }

    /// Joins an API path onto this server URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }
}

impl AsRef<str> for ServerUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl Serialize for ServerUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for ServerUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated hierarchical secret store path, e.g. `/daraz/tokens`.
///
/// # Example
///
/// ```rust
/// use daraz_sdk::StorePath;
///
/// let path = StorePath::new("/daraz/tokens/").unwrap();
/// assert_eq!(path.as_ref(), "/daraz/tokens");
/// assert_eq!(path.child("access_token"), "/daraz/tokens/access_token");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StorePath(String);

impl StorePath {
    /// Creates a new validated store path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStorePath`] if the path is empty, does
    /// not start with `/`, or contains whitespace.
    pub fn new(path: impl Into<String>) -> Result<Self, ConfigError> {
        let path = path.into();
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        if normalized.is_empty()
            || !normalized.starts_with('/')
            || normalized.chars().any(char::is_whitespace)
        {
            return Err(ConfigError::InvalidStorePath { path });
        }

        Ok(Self(normalized.to_string()))
    }

    /// Returns the full path of a direct child entry.
    #[must_use]
    pub fn child(&self, name: &str) -> String {
        if self.0 == "/" {
            format!("/{name}")
        } else {
            format!("{}/{name}", self.0)
        }
    }
}

impl AsRef<str> for StorePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_key_rejects_empty_string() {
        assert!(matches!(AppKey::new(""), Err(ConfigError::EmptyAppKey)));
        assert!(matches!(AppKey::new("   "), Err(ConfigError::EmptyAppKey)));
    }

    #[test]
    fn test_app_secret_masks_value_in_debug() {
        let secret = AppSecret::new("super-secret-key").unwrap();
        let debug_output = format!("{:?}", secret);
        assert_eq!(debug_output, "AppSecret(*****)");
        assert!(!debug_output.contains("super-secret-key"));
    }

    #[test]
    fn test_app_secret_rejects_empty_string() {
        assert!(matches!(
            AppSecret::new(""),
            Err(ConfigError::EmptyAppSecret)
        ));
    }

    #[test]
    fn test_server_url_validates_format() {
        let url = ServerUrl::new("https://api.daraz.com.bd/rest").unwrap();
        assert_eq!(url.host_name(), Some("api.daraz.com.bd"));

        // With port
        let url = ServerUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(url.host_name(), Some("127.0.0.1"));
    }

    #[test]
    fn test_server_url_strips_trailing_slash() {
        let url = ServerUrl::new("https://api.daraz.lk/rest/").unwrap();
        assert_eq!(url.join("/orders/get"), "https://api.daraz.lk/rest/orders/get");
    }

    #[test]
    fn test_server_url_rejects_invalid() {
        assert!(ServerUrl::new("api.daraz.com.bd").is_err());
        assert!(ServerUrl::new("https://").is_err());
        assert!(ServerUrl::new("ftp://api.daraz.com.bd").is_err());
        assert!(ServerUrl::new("://api.daraz.com.bd").is_err());
    }

    #[test]
    fn test_server_url_deserializes_with_validation() {
        let url: ServerUrl = serde_json::from_str(r#""https://api.daraz.pk/rest""#).unwrap();
        assert_eq!(url.as_ref(), "https://api.daraz.pk/rest");

        let bad: Result<ServerUrl, _> = serde_json::from_str(r#""nope""#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_store_path_normalizes_and_joins() {
        let path = StorePath::new("/daraz/tokens/").unwrap();
        assert_eq!(path.as_ref(), "/daraz/tokens");
        assert_eq!(path.child("refresh_token"), "/daraz/tokens/refresh_token");

        let root = StorePath::new("/").unwrap();
        assert_eq!(root.child("code"), "/code");
    }

    #[test]
    fn test_store_path_rejects_invalid() {
        assert!(StorePath::new("").is_err());
        assert!(StorePath::new("daraz/tokens").is_err());
        assert!(StorePath::new("/daraz tokens").is_err());
    }
}
