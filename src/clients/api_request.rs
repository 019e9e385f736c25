//! Request types for the Daraz Open Platform.
//!
//! This module provides [`ApiRequest`], the parameter bag describing one
//! API call, and the [`HttpMethod`] / [`FileParam`] types it is built from.

use std::collections::BTreeMap;
use std::fmt;

/// HTTP methods used by the Open Platform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HttpMethod {
    /// Parameters travel in the query string.
    Get,
    /// Parameters travel in a multipart form body.
    #[default]
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// A file attachment sent as a multipart part.
///
/// File parameters are never part of the signed parameter set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileParam {
    /// File name reported in the part header. Defaults to the parameter name.
    pub file_name: Option<String>,
    /// Raw file contents.
    pub content: Vec<u8>,
}

impl FileParam {
    /// Creates a file parameter from raw bytes.
    #[must_use]
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: None,
            content: content.into(),
        }
    }

    /// Sets the file name reported in the part header.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}

/// Describes one call against the Open Platform API.
///
/// Application parameters are coerced to strings once, when they are added.
/// The stored string is what gets signed and what gets sent, so the two can
/// never disagree: adding `5` and adding `"5"` are indistinguishable.
///
/// A request is built by its caller and then handed to
/// [`ApiClient::execute`](crate::clients::ApiClient::execute); it is not
/// meant to be shared between concurrent calls.
///
/// # Example
///
/// ```rust
/// use daraz_sdk::clients::{ApiRequest, HttpMethod};
///
/// let mut request = ApiRequest::get("/order/items/get");
/// request.add_api_param("order_id", 12345);
///
/// assert_eq!(request.http_method(), HttpMethod::Get);
/// assert_eq!(request.api_params().get("order_id").map(String::as_str), Some("12345"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    path: String,
    http_method: HttpMethod,
    api_params: BTreeMap<String, String>,
    file_params: BTreeMap<String, FileParam>,
}

impl ApiRequest {
    /// Creates a request for `path` using the default method (POST).
    ///
    /// A missing leading `/` is added, so `"orders/get"` and `"/orders/get"`
    /// describe the same call.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_method(path, HttpMethod::default())
    }

    /// Creates a GET request for `path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::with_method(path, HttpMethod::Get)
    }

    /// Creates a POST request for `path`.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::with_method(path, HttpMethod::Post)
    }

    /// Creates a request for `path` with an explicit method.
    #[must_use]
    pub fn with_method(path: impl Into<String>, http_method: HttpMethod) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };

        Self {
            path,
            http_method,
            api_params: BTreeMap::new(),
            file_params: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) an application parameter.
    ///
    /// The value is converted with its `Display` implementation.
    pub fn add_api_param(&mut self, key: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        self.api_params.insert(key.into(), value.to_string());
        self
    }

    /// Adds (or replaces) a file parameter.
    pub fn add_file_param(&mut self, key: impl Into<String>, file: FileParam) -> &mut Self {
        self.file_params.insert(key.into(), file);
        self
    }

    /// Consuming variant of [`add_api_param`](Self::add_api_param).
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.add_api_param(key, value);
        self
    }

    /// Consuming variant of [`add_file_param`](Self::add_file_param).
    #[must_use]
    pub fn file(mut self, key: impl Into<String>, file: FileParam) -> Self {
        self.add_file_param(key, file);
        self
    }

    /// Returns the API path, always starting with `/`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        self.http_method
    }

    /// Returns the application parameters.
    #[must_use]
    pub const fn api_params(&self) -> &BTreeMap<String, String> {
        &self.api_params
    }

    /// Returns the file parameters.
    #[must_use]
    pub const fn file_params(&self) -> &BTreeMap<String, FileParam> {
        &self.file_params
    }
}
