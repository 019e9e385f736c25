//! Error types for the Daraz SDK configuration layer.
//!
//! This module contains error types used when building client and
//! application configuration.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use daraz_sdk::{AppKey, ConfigError};
//!
//! let result = AppKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAppKey)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// App key cannot be empty.
    #[error("App key cannot be empty. Please provide a valid Daraz app key.")]
    EmptyAppKey,

    /// App secret cannot be empty.
    #[error("App secret cannot be empty. Please provide a valid Daraz app secret.")]
    EmptyAppSecret,

    /// Server URL is invalid.
    #[error("Invalid server URL '{url}'. Please provide a URL with scheme (e.g., 'https://api.daraz.com.bd/rest').")]
    InvalidServerUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Log level is not one of the recognised values.
    #[error("Invalid log level '{level}'. Expected one of 'DEBUG', 'INFO' or 'ERROR'.")]
    InvalidLogLevel {
        /// The invalid level that was provided.
        level: String,
    },

    /// Timeout value could not be parsed.
    #[error("Invalid timeout '{value}'. Expected a whole number of seconds.")]
    InvalidTimeout {
        /// The invalid timeout that was provided.
        value: String,
    },

    /// A secret store path is invalid.
    #[error("Invalid secret store path '{path}'. Paths must be non-empty and start with '/'.")]
    InvalidStorePath {
        /// The invalid path that was provided.
        path: String,
    },

    /// The order cutoff timestamp could not be parsed.
    #[error("Invalid timestamp '{value}'. Expected ISO-8601 with offset (e.g., '2021-01-01T00:00:00+06:00').")]
    InvalidTimestamp {
        /// The invalid timestamp that was provided.
        value: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
