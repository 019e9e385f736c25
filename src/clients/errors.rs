//! Error types for calls against the Daraz Open Platform.
//!
//! # Error Handling
//!
//! The client separates two very different kinds of failure:
//!
//! - **Transport failures** ([`TransportError`], wrapped in
//!   [`ApiError::Transport`]): the HTTP exchange could not be completed
//!   (timeout, refused connection, broken body). These are returned as `Err`.
//! - **API-level failures**: the platform answered with a well-formed
//!   envelope whose `code` is not `"0"`. These are *not* errors at this
//!   layer; they come back as an [`ApiResponse`](crate::clients::ApiResponse)
//!   and the caller decides what to do.
//!
//! # Example
//!
//! ```rust,ignore
//! use daraz_sdk::clients::{ApiClient, ApiError, ApiRequest};
//!
//! match client.execute(&ApiRequest::get("/orders/get"), Some(token)).await {
//!     Ok(response) if response.is_success() => println!("{}", response.body),
//!     Ok(response) => println!("API error {:?}: {:?}", response.code, response.message),
//!     Err(ApiError::Transport { path, source }) => println!("{path} failed: {source}"),
//!     Err(other) => println!("{other}"),
//! }
//! ```

use std::time::Duration;

use thiserror::Error;

/// Failure of the underlying HTTP exchange.
///
/// Variants carry plain data rather than the HTTP library's error type so
/// that any [`HttpTransport`](crate::clients::HttpTransport) implementation
/// can produce them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No complete response arrived within the configured timeout.
    #[error("Request timed out after {timeout:?}")]
    Timeout {
        /// The timeout that was exceeded.
        timeout: Duration,
    },

    /// The connection to the server could not be established.
    #[error("Connection failed: {message}")]
    Connect {
        /// Description of the failure.
        message: String,
    },

    /// Any other failure while sending the request or reading the response.
    #[error("Request failed: {message}")]
    Request {
        /// Description of the failure.
        message: String,
    },
}

impl TransportError {
    /// Classifies a `reqwest` error.
    pub(crate) fn from_reqwest(error: &reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            Self::Timeout { timeout }
        } else if error.is_connect() {
            Self::Connect {
                message: error.to_string(),
            }
        } else {
            Self::Request {
                message: error.to_string(),
            }
        }
    }
}

/// Errors returned by [`ApiClient`](crate::clients::ApiClient).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP exchange failed; no envelope is available.
    #[error("HTTP error calling {path}: {source}")]
    Transport {
        /// The API path that was being called.
        path: String,
        /// The underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// The server answered, but the body is not valid JSON.
    #[error("Invalid JSON response from {path} (HTTP {status}): {message}")]
    InvalidResponse {
        /// The API path that was being called.
        path: String,
        /// The HTTP status code of the response.
        status: u16,
        /// The JSON decoding error.
        message: String,
    },

    /// The default HTTP transport could not be constructed.
    #[error("Failed to initialise HTTP transport: {message}")]
    Setup {
        /// Description of the failure.
        message: String,
    },
}

impl ApiError {
    /// Returns `true` if this error is a transport timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                source: TransportError::Timeout { .. },
                ..
            }
        )
    }
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TransportError>();
    assert_send_sync::<ApiError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_timeout_error_mentions_duration() {
        let error = TransportError::Timeout {
            timeout: Duration::from_secs(30),
        };
        assert_eq!(error.to_string(), "Request timed out after 30s");
    }

    #[test]
    fn test_transport_error_exposes_source() {
        let error = ApiError::Transport {
            path: "/orders/get".to_string(),
            source: TransportError::Connect {
                message: "connection refused".to_string(),
            },
        };

        let message = error.to_string();
        assert!(message.contains("/orders/get"));
        assert!(message.contains("connection refused"));
        assert!(error.source().is_some());
        assert!(!error.is_timeout());
    }

    #[test]
    fn test_is_timeout_only_matches_timeouts() {
        let timeout = ApiError::Transport {
            path: "/orders/get".to_string(),
            source: TransportError::Timeout {
                timeout: Duration::from_millis(10),
            },
        };
        assert!(timeout.is_timeout());

        let invalid = ApiError::InvalidResponse {
            path: "/orders/get".to_string(),
            status: 502,
            message: "expected value".to_string(),
        };
        assert!(!invalid.is_timeout());
        assert!(invalid.to_string().contains("HTTP 502"));
    }
}
