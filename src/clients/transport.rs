//! HTTP transport abstraction.
//!
//! [`ApiClient`](crate::clients::ApiClient) never talks to the network
//! directly. It describes the exchange as a [`TransportRequest`] and hands it
//! to an [`HttpTransport`], which makes the client testable without a live
//! server. [`ReqwestTransport`] is the production implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::clients::api_request::FileParam;
use crate::clients::errors::TransportError;

/// How the parameters of a call travel on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// `GET` with every parameter in the query string.
    Query,
    /// `POST` with parameters and files as `multipart/form-data` parts.
    Multipart,
}

/// A fully signed HTTP exchange, ready to be sent.
#[derive(Clone, Debug)]
pub struct TransportRequest {
    /// How the parameters are encoded.
    pub dispatch: Dispatch,
    /// Endpoint URL without query string.
    pub url: String,
    /// Signed parameters, including `sign`.
    pub params: Vec<(String, String)>,
    /// File attachments (multipart only).
    pub files: Vec<(String, FileParam)>,
    /// Upper bound for the whole exchange.
    pub timeout: Duration,
}

impl TransportRequest {
    /// Returns the value of a parameter, if present.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// The raw result of an HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

/// Capability that performs one HTTP exchange.
///
/// Implementations must honour [`TransportRequest::timeout`] and report a
/// timeout as [`TransportError::Timeout`]. They must not retry.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the exchange cannot be completed.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// [`HttpTransport`] backed by `reqwest` with rustls.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a fresh connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Request`] if the TLS backend cannot be
    /// initialised.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| TransportError::Request {
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest` client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn multipart_form(params: Vec<(String, String)>, files: Vec<(String, FileParam)>) -> Form {
        let mut form = Form::new();
        for (name, value) in params {
            form = form.text(name, value);
        }
        for (name, file) in files {
            let file_name = file.file_name.unwrap_or_else(|| name.clone());
            form = form.part(name, Part::bytes(file.content).file_name(file_name));
        }
        form
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let TransportRequest {
            dispatch,
            url,
            params,
            files,
            timeout,
        } = request;

        let builder = match dispatch {
            Dispatch::Query => self.client.get(&url).query(&params),
            Dispatch::Multipart => self
                .client
                .post(&url)
                .multipart(Self::multipart_form(params, files)),
        };

        let response = builder
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&e, timeout))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest(&e, timeout))?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

// Verify transports are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
    assert_send_sync::<TransportRequest>();
};
