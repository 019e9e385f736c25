//! Response envelope for the Daraz Open Platform.
//!
//! Every Open Platform endpoint answers with a JSON object that may carry
//! the status keys `code`, `type`, `message` and `request_id` next to an
//! endpoint-specific payload. [`ApiResponse`] lifts those keys into typed
//! fields and keeps the whole payload in [`ApiResponse::body`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The `code` value that signals success.
pub const SUCCESS_CODE: &str = "0";

/// Normalized result of one API call.
///
/// # Field semantics
///
/// - A status key that is absent and a status key whose value is `null`
///   both decode to `None`.
/// - Scalar values are coerced to strings: `"code": 0` and `"code": "0"`
///   both decode to `Some("0")`.
/// - `body` always holds the full parsed payload, whether the call
///   succeeded or not. A payload that is not a JSON object leaves every
///   status field at `None`.
///
/// # Example
///
/// ```rust
/// use daraz_sdk::clients::ApiResponse;
/// use serde_json::json;
///
/// let response = ApiResponse::from_body(json!({
///     "code": "21",
///     "type": "ISV",
///     "message": "invalid code",
///     "request_id": "0b1234"
/// }));
///
/// assert!(!response.is_success());
/// assert_eq!(response.code.as_deref(), Some("21"));
/// assert_eq!(response.message.as_deref(), Some("invalid code"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ApiResponse {
    /// Error category reported by the platform (`ISV`, `ISP`, `SYSTEM`).
    #[serde(rename = "type")]
    pub response_type: Option<String>,
    /// Status code; `None` or `"0"` means success.
    pub code: Option<String>,
    /// Human-readable status message.
    pub message: Option<String>,
    /// Platform request identifier.
    pub request_id: Option<String>,
    /// The full parsed payload.
    pub body: Value,
}

#[derive(Debug, Default, Deserialize)]
struct StatusFields {
    #[serde(default, rename = "type", deserialize_with = "scalar_string")]
    response_type: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    code: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    message: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    request_id: Option<String>,
}

/// Deserializes an optional scalar as a string; `null` becomes `None`.
pub(crate) fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

impl ApiResponse {
    /// Builds an envelope from an already parsed JSON payload.
    #[must_use]
    pub fn from_body(body: Value) -> Self {
        let fields = if body.is_object() {
            StatusFields::deserialize(&body).unwrap_or_default()
        } else {
            StatusFields::default()
        };

        Self {
            response_type: fields.response_type,
            code: fields.code,
            message: fields.message,
            request_id: fields.request_id,
            body,
        }
    }

    /// Parses raw response bytes into an envelope.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if `bytes` is not valid JSON.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes).map(Self::from_body)
    }

    /// Returns `true` if `code` is absent or `"0"`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code.as_deref().map_or(true, |code| code == SUCCESS_CODE)
    }

    /// Returns the `data` member of the payload, if present.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.body.get("data")
    }

    /// Returns a top-level string member of the payload.
    #[must_use]
    pub fn body_str(&self, key: &str) -> Option<&str> {
        self.body.get(key).and_then(Value::as_str)
    }
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type={} code={} message={} requestId={}",
            self.response_type.as_deref().unwrap_or_default(),
            self.code.as_deref().unwrap_or_default(),
            self.message.as_deref().unwrap_or_default(),
            self.request_id.as_deref().unwrap_or_default(),
        )
    }
}
