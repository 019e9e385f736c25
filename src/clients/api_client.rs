//! Signed-request client for the Daraz Open Platform.
//!
//! This module provides [`ApiClient`], which turns an
//! [`ApiRequest`] into a signed HTTP exchange and the answer into an
//! [`ApiResponse`].

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Local, Utc};

use crate::clients::api_request::{ApiRequest, HttpMethod};
use crate::clients::api_response::ApiResponse;
use crate::clients::errors::ApiError;
use crate::clients::transport::{
    Dispatch, HttpTransport, ReqwestTransport, TransportRequest, TransportResponse,
};
use crate::config::ClientConfig;
use crate::signing::{self, SIGN_METHOD, SIGN_PARAM};

/// System parameter: app key.
pub const P_APP_KEY: &str = "app_key";
/// System parameter: bearer access token.
pub const P_ACCESS_TOKEN: &str = "access_token";
/// System parameter: request timestamp.
pub const P_TIMESTAMP: &str = "timestamp";
/// System parameter: signature method.
pub const P_SIGN_METHOD: &str = "sign_method";
/// System parameter: SDK version tag.
pub const P_PARTNER_ID: &str = "partner_id";
/// System parameter: platform debug flag.
pub const P_DEBUG: &str = "debug";

/// Code logged when the HTTP exchange itself fails.
const HTTP_ERROR_CODE: &str = "HTTP_ERROR";
/// Code logged when the response body is not JSON.
const INVALID_RESPONSE_CODE: &str = "INVALID_RESPONSE";

/// Formats the platform timestamp for `now`.
///
/// The platform expects milliseconds, but the value sent is the Unix time
/// rounded to the nearest whole second with `"000"` appended. An exact half
/// second rounds to the even neighbour.
#[must_use]
pub fn platform_timestamp(now: DateTime<Utc>) -> String {
    const HALF_SECOND_NANOS: u32 = 500_000_000;

    let mut seconds = now.timestamp();
    let nanos = now.timestamp_subsec_nanos();
    if nanos > HALF_SECOND_NANOS || (nanos == HALF_SECOND_NANOS && seconds % 2 != 0) {
        seconds += 1;
    }
    format!("{seconds}000")
}

/// A request after system parameters were merged in and the signature
/// computed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SignedCall {
    /// Endpoint URL without query string.
    pub url: String,
    /// Merged system and application parameters (the signed set).
    pub params: BTreeMap<String, String>,
    /// Uppercase hex signature over `params`.
    pub signature: String,
}

impl SignedCall {
    /// Parameters as sent on the wire, `sign` last.
    pub fn wire_params(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .chain(std::iter::once((
                SIGN_PARAM.to_string(),
                self.signature.clone(),
            )))
            .collect()
    }

    /// Human-readable URL with every signed parameter, used in log entries.
    pub fn debug_url(&self) -> String {
        let query = self
            .wire_params()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.url)
    }
}

/// Client for signed calls against the Daraz Open Platform.
///
/// Each call to [`execute`](Self::execute):
///
/// 1. builds the system parameters (`app_key`, `sign_method`, `timestamp`,
///    `partner_id`, optionally `debug` and `access_token`);
/// 2. merges the request's application parameters over them;
/// 3. signs the merged set and adds `sign`;
/// 4. sends the call as a query-string `GET`, or as a multipart `POST` when
///    the method is `POST` or any file is attached;
/// 5. decodes the JSON answer into an [`ApiResponse`] and logs it.
///
/// There is exactly one attempt per call. Retrying is up to the caller.
///
/// # Thread Safety
///
/// `ApiClient` is `Send + Sync`.
///
/// # Example
///
/// ```rust,ignore
/// use daraz_sdk::clients::{ApiClient, ApiRequest};
///
/// let client = ApiClient::new(config)?;
///
/// let mut request = ApiRequest::get("/orders/get");
/// request.add_api_param("created_after", "2021-01-01T00:00:00+06:00");
///
/// let response = client.execute(&request, Some(&access_token)).await?;
/// if response.is_success() {
///     println!("{}", response.body);
/// }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
}

// Verify ApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiClient>();
};

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client that sends requests with [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Setup`] if the HTTP transport cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new().map_err(|e| ApiError::Setup {
            message: e.to_string(),
        })?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client over an explicit transport.
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds the system parameters for one call.
    #[must_use]
    pub fn system_parameters(
        &self,
        access_token: Option<&str>,
        now: DateTime<Utc>,
    ) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert(
            P_APP_KEY.to_string(),
            self.config.app_key().as_ref().to_string(),
        );
        params.insert(P_SIGN_METHOD.to_string(), SIGN_METHOD.to_string());
        params.insert(P_TIMESTAMP.to_string(), platform_timestamp(now));
        params.insert(
            P_PARTNER_ID.to_string(),
            self.config.partner_id().to_string(),
        );

        if self.config.log_level().sends_debug_flag() {
            params.insert(P_DEBUG.to_string(), "true".to_string());
        }

        if let Some(token) = access_token.filter(|token| !token.is_empty()) {
            params.insert(P_ACCESS_TOKEN.to_string(), token.to_string());
        }

        params
    }

    /// Merges and signs the parameters of `request`.
    pub(crate) fn sign_request(
        &self,
        request: &ApiRequest,
        access_token: Option<&str>,
        now: DateTime<Utc>,
    ) -> SignedCall {
        let mut params = self.system_parameters(access_token, now);
        // Application parameters win over system parameters of the same name
        params.extend(
            request
                .api_params()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        let signature = signing::sign(
            self.config.app_secret().as_ref(),
            request.path(),
            &params,
        );

        SignedCall {
            url: self.config.server_url().join(request.path()),
            params,
            signature,
        }
    }

    /// Chooses how a request travels on the wire.
    #[must_use]
    pub fn dispatch_for(request: &ApiRequest) -> Dispatch {
        if request.http_method() == HttpMethod::Post || !request.file_params().is_empty() {
            Dispatch::Multipart
        } else {
            Dispatch::Query
        }
    }

    /// Executes one signed call.
    ///
    /// An API-level failure (a `code` other than `"0"`) is logged and
    /// returned inside the envelope; it is not an `Err`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] if the exchange fails or times out
    /// - [`ApiError::InvalidResponse`] if the body is not valid JSON
    pub async fn execute(
        &self,
        request: &ApiRequest,
        access_token: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let signed = self.sign_request(request, access_token, Utc::now());
        let debug_url = signed.debug_url();

        let transport_request = TransportRequest {
            dispatch: Self::dispatch_for(request),
            url: signed.url.clone(),
            params: signed.wire_params(),
            files: request
                .file_params()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            timeout: self.config.timeout(),
        };

        let TransportResponse { status, body } = match self.transport.send(transport_request).await
        {
            Ok(response) => response,
            Err(source) => {
                self.log_api_error(&debug_url, HTTP_ERROR_CODE, &source.to_string());
                return Err(ApiError::Transport {
                    path: request.path().to_string(),
                    source,
                });
            }
        };

        let response = match ApiResponse::from_slice(&body) {
            Ok(response) => response,
            Err(e) => {
                self.log_api_error(&debug_url, INVALID_RESPONSE_CODE, &e.to_string());
                return Err(ApiError::InvalidResponse {
                    path: request.path().to_string(),
                    status,
                    message: e.to_string(),
                });
            }
        };

        if !response.is_success() {
            self.log_api_error(
                &debug_url,
                response.code.as_deref().unwrap_or_default(),
                response.message.as_deref().unwrap_or_default(),
            );
        } else if self.config.log_level().logs_success() {
            self.log_api_call(&debug_url);
        }

        tracing::debug!(
            path = %request.path(),
            status,
            envelope = %response,
            body = %response.body,
            "Daraz API response"
        );

        Ok(response)
    }

    fn log_api_error(&self, request_url: &str, code: &str, message: &str) {
        tracing::error!(
            app_key = %self.config.app_key().as_ref(),
            sdk_version = %self.config.partner_id(),
            time = %Local::now().format("%Y-%m-%d %H:%M:%S"),
            platform = std::env::consts::OS,
            server_host = %self.config.server_url().host_name().unwrap_or_default(),
            request_url = %request_url,
            code = %code,
            error_message = %message,
            "Daraz API error"
        );
    }

    fn log_api_call(&self, request_url: &str) {
        tracing::info!(
            app_key = %self.config.app_key().as_ref(),
            sdk_version = %self.config.partner_id(),
            time = %Local::now().format("%Y-%m-%d %H:%M:%S"),
            platform = std::env::consts::OS,
            server_host = %self.config.server_url().host_name().unwrap_or_default(),
            request_url = %request_url,
            code = "",
            error_message = "",
            "Daraz API call"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::api_request::FileParam;
    use crate::clients::errors::TransportError;
    use crate::config::{AppKey, AppSecret, LogLevel, ServerUrl};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records every request and answers with a canned result.
    struct RecordingTransport {
        result: Result<TransportResponse, TransportError>,
        sent: Mutex<Vec<TransportRequest>>,
    }

    impl RecordingTransport {
        fn replying(body: &str) -> Arc<Self> {
            Arc::new(Self {
                result: Ok(TransportResponse {
                    status: 200,
                    body: body.as_bytes().to_vec(),
                }),
                sent: Mutex::new(Vec::new()),
            })
        }

        fn failing(error: TransportError) -> Arc<Self> {
            Arc::new(Self {
                result: Err(error),
                sent: Mutex::new(Vec::new()),
            })
        }

        fn last(&self) -> TransportRequest {
            self.sent.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl HttpTransport for RecordingTransport {
        async fn send(
            &self,
            request: TransportRequest,
        ) -> Result<TransportResponse, TransportError> {
            self.sent.lock().unwrap().push(request);
            self.result.clone()
        }
    }

    fn config(level: LogLevel) -> ClientConfig {
        ClientConfig::builder()
            .server_url(ServerUrl::new("https://api.daraz.com.bd/rest").unwrap())
            .app_key(AppKey::new("123456").unwrap())
            .app_secret(AppSecret::new("test-secret").unwrap())
            .timeout(Duration::from_secs(7))
            .log_level(level)
            .partner_id("test-sdk")
            .build()
            .unwrap()
    }

    fn client_with(level: LogLevel, transport: Arc<RecordingTransport>) -> ApiClient {
        ApiClient::with_transport(config(level), transport)
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_platform_timestamp_appends_three_zeros() {
        assert_eq!(platform_timestamp(fixed_now()), "1700000000000");
    }

    #[test]
    fn test_platform_timestamp_rounds_to_nearest_second() {
        let just_before = Utc.timestamp_opt(1_700_000_000, 499_000_000).unwrap();
        let just_after = Utc.timestamp_opt(1_700_000_000, 500_000_001).unwrap();

        assert_eq!(platform_timestamp(just_before), "1700000000000");
        assert_eq!(platform_timestamp(just_after), "1700000001000");
    }

    #[test]
    fn test_platform_timestamp_rounds_half_to_even() {
        let even_half = Utc.timestamp_opt(1_700_000_000, 500_000_000).unwrap();
        let odd_half = Utc.timestamp_opt(1_700_000_001, 500_000_000).unwrap();

        assert_eq!(platform_timestamp(even_half), "1700000000000");
        assert_eq!(platform_timestamp(odd_half), "1700000002000");
    }

    #[test]
    fn test_system_parameters_default_set() {
        let client = client_with(LogLevel::Error, RecordingTransport::replying("{}"));
        let params = client.system_parameters(None, fixed_now());

        assert_eq!(params.get(P_APP_KEY).map(String::as_str), Some("123456"));
        assert_eq!(params.get(P_SIGN_METHOD).map(String::as_str), Some("sha256"));
        assert_eq!(
            params.get(P_TIMESTAMP).map(String::as_str),
            Some("1700000000000")
        );
        assert_eq!(params.get(P_PARTNER_ID).map(String::as_str), Some("test-sdk"));
        assert!(!params.contains_key(P_DEBUG));
        assert!(!params.contains_key(P_ACCESS_TOKEN));
    }

    #[test]
    fn test_system_parameters_debug_flag_only_at_debug_level() {
        let debug = client_with(LogLevel::Debug, RecordingTransport::replying("{}"));
        let info = client_with(LogLevel::Info, RecordingTransport::replying("{}"));

        assert_eq!(
            debug
                .system_parameters(None, fixed_now())
                .get(P_DEBUG)
                .map(String::as_str),
            Some("true")
        );
        assert!(!info
            .system_parameters(None, fixed_now())
            .contains_key(P_DEBUG));
    }

    #[test]
    fn test_system_parameters_include_token_when_given() {
        let client = client_with(LogLevel::Error, RecordingTransport::replying("{}"));

        let params = client.system_parameters(Some("tok"), fixed_now());
        assert_eq!(params.get(P_ACCESS_TOKEN).map(String::as_str), Some("tok"));

        let params = client.system_parameters(Some(""), fixed_now());
        assert!(!params.contains_key(P_ACCESS_TOKEN));
    }

    #[test]
    fn test_application_params_override_system_params() {
        let client = client_with(LogLevel::Error, RecordingTransport::replying("{}"));
        let request = ApiRequest::get("/orders/get")
            .param("timestamp", "42")
            .param("created_after", "2021-01-01T00:00:00+06:00");

        let signed = client.sign_request(&request, None, fixed_now());

        assert_eq!(signed.params.get("timestamp").map(String::as_str), Some("42"));
        assert_eq!(
            signed.signature,
            signing::sign("test-secret", "/orders/get", &signed.params)
        );
        assert!(!signed.params.contains_key(SIGN_PARAM));
    }

    #[test]
    fn test_signature_follows_stored_string_form() {
        let client = client_with(LogLevel::Error, RecordingTransport::replying("{}"));
        let number = ApiRequest::get("/order/items/get").param("order_id", 5);
        let text = ApiRequest::get("/order/items/get").param("order_id", "5");
        let decimal = ApiRequest::get("/order/items/get").param("order_id", "5.0");

        let sign = |request: &ApiRequest| client.sign_request(request, None, fixed_now()).signature;

        assert_eq!(sign(&number), sign(&text));
        assert_ne!(sign(&decimal), sign(&text));
    }

    #[test]
    fn test_debug_url_lists_every_signed_param_and_sign_last() {
        let client = client_with(LogLevel::Error, RecordingTransport::replying("{}"));
        let request = ApiRequest::get("/order/items/get").param("order_id", 7);

        let signed = client.sign_request(&request, Some("tok"), fixed_now());
        let url = signed.debug_url();

        assert_eq!(
            url,
            format!(
                "https://api.daraz.com.bd/rest/order/items/get?access_token=tok&app_key=123456\
                 &order_id=7&partner_id=test-sdk&sign_method=sha256&timestamp=1700000000000\
                 &sign={}",
                signed.signature
            )
        );
    }

    #[test]
    fn test_dispatch_selection_for_all_combinations() {
        let file = FileParam::new(b"x".to_vec());

        let get_plain = ApiRequest::get("/p");
        let get_file = ApiRequest::get("/p").file("f", file.clone());
        let post_plain = ApiRequest::post("/p");
        let post_file = ApiRequest::post("/p").file("f", file);

        assert_eq!(ApiClient::dispatch_for(&get_plain), Dispatch::Query);
        assert_eq!(ApiClient::dispatch_for(&get_file), Dispatch::Multipart);
        assert_eq!(ApiClient::dispatch_for(&post_plain), Dispatch::Multipart);
        assert_eq!(ApiClient::dispatch_for(&post_file), Dispatch::Multipart);
    }

    #[tokio::test]
    async fn test_execute_sends_signed_params_with_configured_timeout() {
        let transport = RecordingTransport::replying(r#"{"code":"0","data":[]}"#);
        let client = client_with(LogLevel::Error, transport.clone());
        let request = ApiRequest::get("/order/items/get").param("order_id", 1);

        let response = client.execute(&request, Some("tok")).await.unwrap();
        assert!(response.is_success());

        let sent = transport.last();
        assert_eq!(sent.dispatch, Dispatch::Query);
        assert_eq!(sent.url, "https://api.daraz.com.bd/rest/order/items/get");
        assert_eq!(sent.timeout, Duration::from_secs(7));
        assert_eq!(sent.param("order_id"), Some("1"));
        assert_eq!(sent.param("access_token"), Some("tok"));
        assert!(sent.files.is_empty());

        let signed_set: BTreeMap<String, String> = sent
            .params
            .iter()
            .filter(|(k, _)| k != SIGN_PARAM)
            .cloned()
            .collect();
        assert!(signing::verify(
            "test-secret",
            "/order/items/get",
            &signed_set,
            sent.param(SIGN_PARAM).unwrap()
        ));
    }

    #[tokio::test]
    async fn test_execute_forwards_files_on_multipart() {
        let transport = RecordingTransport::replying(r#"{"code":"0"}"#);
        let client = client_with(LogLevel::Error, transport.clone());
        let request = ApiRequest::get("/image/upload").file("image", FileParam::new(b"PNG".to_vec()));

        client.execute(&request, None).await.unwrap();

        let sent = transport.last();
        assert_eq!(sent.dispatch, Dispatch::Multipart);
        assert_eq!(sent.files.len(), 1);
        assert_eq!(sent.files[0].0, "image");
        // File contents never reach the signed set
        assert!(sent.param("image").is_none());
    }

    #[tokio::test]
    async fn test_api_error_code_is_returned_not_raised() {
        let transport = RecordingTransport::replying(r#"{"code":"21","message":"invalid code"}"#);
        let client = client_with(LogLevel::Error, transport);

        let response = client
            .execute(&ApiRequest::new("/auth/token/create").param("code", "x"), None)
            .await
            .unwrap();

        assert!(!response.is_success());
        assert_eq!(response.code.as_deref(), Some("21"));
        assert_eq!(response.message.as_deref(), Some("invalid code"));
    }

    #[tokio::test]
    async fn test_transport_timeout_surfaces_as_error() {
        let transport = RecordingTransport::failing(TransportError::Timeout {
            timeout: Duration::from_secs(7),
        });
        let client = client_with(LogLevel::Error, transport);

        let result = client.execute(&ApiRequest::get("/orders/get"), None).await;

        let error = result.unwrap_err();
        assert!(error.is_timeout());
        assert!(matches!(error, ApiError::Transport { ref path, .. } if path == "/orders/get"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_reported_with_status() {
        let transport = RecordingTransport::replying("<html>bad gateway</html>");
        let client = client_with(LogLevel::Info, transport);

        let result = client.execute(&ApiRequest::get("/orders/get"), None).await;

        assert!(matches!(
            result,
            Err(ApiError::InvalidResponse { status: 200, .. })
        ));
    }

    #[tokio::test]
    async fn test_debug_level_sends_debug_flag_on_the_wire() {
        let transport = RecordingTransport::replying(r#"{"code":"0"}"#);
        let client = client_with(LogLevel::Debug, transport.clone());

        client.execute(&ApiRequest::get("/orders/get"), None).await.unwrap();

        assert_eq!(transport.last().param(P_DEBUG), Some("true"));
    }
}
