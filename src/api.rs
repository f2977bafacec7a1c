//! JSON:API transport for the Lemon Squeezy REST API.
//!
//! Commands build an [`ApiRequest`] and hand it to a [`Transport`]. The result keeps
//! the upstream shape: a raw envelope on success, or a `{message, status}` failure
//! for non-2xx answers. Connection problems are returned as `Err`.

use crate::error::LmsqError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.lemonsqueezy.com/v1";
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";
/// The License API answers plain JSON to form posts.
pub const JSON_MEDIA_TYPE: &str = "application/json";

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One call against the API. `path` is relative to the base URL and starts with `/`.
///
/// `body` is sent as a JSON:API document; `form` as `application/x-www-form-urlencoded`.
/// A request carries at most one of the two.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub form: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            form: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_form(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((key.into(), value.into()));
        self
    }

    /// First value of a query parameter.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value of a form field.
    pub fn form_value(&self, key: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Error answer from the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub message: String,
    pub status: u16,
}

/// Either a raw envelope (`None` for empty bodies) or a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub data: Option<Value>,
    pub error: Option<ApiFailure>,
}

impl ApiResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            data: None,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, status: u16) -> Self {
        Self {
            data: None,
            error: Some(ApiFailure {
                message: message.into(),
                status,
            }),
        }
    }

    /// Turn a failure into `LmsqError::Api`, keeping the status.
    pub fn into_result(self) -> Result<Option<Value>, LmsqError> {
        match self.error {
            Some(ApiFailure { message, status }) => Err(LmsqError::Api { message, status }),
            None => Ok(self.data),
        }
    }
}

/// Sends requests to the API.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, LmsqError>;
}

/// Message for a failed answer: `errors[0].detail`, then `errors[0].title`, then a
/// top-level `error` string (License API), then `HTTP <status>`.
pub fn error_message(body: Option<&Value>, status: u16) -> String {
    let first = body
        .and_then(|b| b.get("errors"))
        .and_then(|errors| errors.get(0));
    first
        .and_then(|e| e.get("detail"))
        .and_then(Value::as_str)
        .or_else(|| first.and_then(|e| e.get("title")).and_then(Value::as_str))
        .or_else(|| body.and_then(|b| b.get("error")).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status))
}

fn map_http_error(error: reqwest::Error) -> LmsqError {
    if error.is_timeout() {
        LmsqError::Network(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        LmsqError::Network(format!("Connection error: {}", error))
    } else {
        LmsqError::Network(format!("HTTP error: {}", error))
    }
}

/// reqwest-backed transport. Requests carry a bearer token when a key is set.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(api_key: impl Into<String>, base_url: Option<&str>) -> Result<Self, LmsqError> {
        Self::build(Some(api_key.into()), base_url)
    }

    /// Transport for the public License API, which takes no key.
    pub fn anonymous(base_url: Option<&str>) -> Result<Self, LmsqError> {
        Self::build(None, base_url)
    }

    fn build(api_key: Option<String>, base_url: Option<&str>) -> Result<Self, LmsqError> {
        let client = Client::builder()
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .timeout(HTTP_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LmsqError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, LmsqError> {
        let url = self.url_for(&request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let accept = if request.form.is_empty() {
            JSON_API_MEDIA_TYPE
        } else {
            JSON_MEDIA_TYPE
        };
        let mut builder = self
            .client
            .request(method, &url)
            .header(reqwest::header::ACCEPT, accept);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if !request.form.is_empty() {
            builder = builder.form(&request.form);
        } else if let Some(body) = &request.body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, JSON_API_MEDIA_TYPE)
                .body(serde_json::to_vec(body)?);
        }

        debug!(method = %request.method, path = %request.path, "Sending API request");
        let response = builder.send().await.map_err(map_http_error)?;
        let status = response.status();
        debug!(method = %request.method, path = %request.path, status = status.as_u16(), "API response");

        let text = response.text().await.map_err(map_http_error)?;

        if !status.is_success() {
            let body = serde_json::from_str::<Value>(&text).ok();
            return Ok(ApiResponse::failure(
                error_message(body.as_ref(), status.as_u16()),
                status.as_u16(),
            ));
        }

        if status == reqwest::StatusCode::NO_CONTENT || text.trim().is_empty() {
            return Ok(ApiResponse::empty());
        }

        let data: Value = serde_json::from_str(&text).map_err(|e| {
            LmsqError::MalformedResponse(format!("response body is not JSON: {}", e))
        })?;
        Ok(ApiResponse::ok(data))
    }
}
