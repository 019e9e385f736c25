//! Error types for the OAuth token lifecycle.
//!
//! # Example
//!
//! ```rust
//! use daraz_sdk::auth::TokenError;
//!
//! let error = TokenError::MissingField {
//!     field: "access_token",
//!     code: Some("21".to_string()),
//!     message: Some("invalid code".to_string()),
//! };
//! assert!(error.to_string().contains("access_token"));
//! assert!(error.to_string().contains("invalid code"));
//! ```

use thiserror::Error;

use crate::clients::ApiError;
use crate::store::SecretStoreError;

/// Errors that can occur while obtaining, loading or persisting tokens.
///
/// # Thread Safety
///
/// `TokenError` is `Send + Sync`, making it safe to use across async boundaries.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token call failed at the transport level.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The token response lacks a required string field.
    ///
    /// This is what an API-level rejection (for example an expired
    /// authorization code) turns into, since such responses carry no tokens.
    #[error(
        "Token response has no '{field}' (code: {}, message: {})",
        .code.as_deref().unwrap_or("-"),
        .message.as_deref().unwrap_or("-")
    )]
    MissingField {
        /// The missing field.
        field: &'static str,
        /// The platform status code, if the response carried one.
        code: Option<String>,
        /// The platform status message, if the response carried one.
        message: Option<String>,
    },

    /// Reading or writing the secret store failed.
    #[error(transparent)]
    Store(#[from] SecretStoreError),
}

// Verify TokenError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenError>();
};
