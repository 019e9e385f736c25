//! Signed HTTP client for the Daraz Open Platform.
//!
//! This module provides the request-signing client layer: it merges system
//! parameters into each call, signs the result, sends it over an injected
//! transport and normalizes the JSON answer.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ApiClient`]: The async client that signs and sends calls
//! - [`ApiRequest`]: One call (path, method, parameters, files)
//! - [`ApiResponse`]: The normalized response envelope
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST)
//! - [`FileParam`]: A file attachment for multipart calls
//! - [`HttpTransport`]: The capability that performs the HTTP exchange
//! - [`ReqwestTransport`]: The default `reqwest`-backed transport
//! - [`ApiError`] / [`TransportError`]: Failures of a call
//!
//! # Example
//!
//! ```rust,ignore
//! use daraz_sdk::clients::{ApiClient, ApiRequest};
//!
//! let client = ApiClient::new(config)?;
//!
//! let request = ApiRequest::get("/orders/get")
//!     .param("created_after", "2021-01-01T00:00:00+06:00");
//!
//! let response = client.execute(&request, Some(&access_token)).await?;
//! ```
//!
//! # Retry Behavior
//!
//! The client never retries. Each [`ApiClient::execute`] call makes exactly
//! one HTTP exchange, bounded by the configured timeout (30 seconds by
//! default).

mod api_client;
mod api_request;
mod api_response;
mod errors;
mod transport;

pub use api_client::{
    platform_timestamp, ApiClient, P_ACCESS_TOKEN, P_APP_KEY, P_DEBUG, P_PARTNER_ID,
    P_SIGN_METHOD, P_TIMESTAMP,
};
pub use api_request::{ApiRequest, FileParam, HttpMethod};
pub use api_response::{ApiResponse, SUCCESS_CODE};
pub(crate) use api_response::scalar_string;
pub use errors::{ApiError, TransportError};
pub use transport::{Dispatch, HttpTransport, ReqwestTransport, TransportRequest, TransportResponse};
