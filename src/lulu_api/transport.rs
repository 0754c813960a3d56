use crate::lulu_api::request::Headers;
use crate::lulu_api::types::ApiError;
use reqwest::Method;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Default request timeout for [`ReqwestTransport`]
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Body of an outgoing request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` fields
    Form(Vec<(String, String)>),
}

/// A fully-formed HTTP request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    /// Form value for `name`, if this is a form request
    pub fn form_value(&self, name: &str) -> Option<&str> {
        match &self.body {
            RequestBody::Form(fields) => fields
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }
}

pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<serde_json::Value, ApiError>> + Send + 'a>>;

/// Performs HTTP requests on behalf of the client
///
/// Implementations return the parsed JSON body for 2xx responses (or
/// `Value::Null` for an empty body) and an [`ApiError`] otherwise.
pub trait HttpTransport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// [`HttpTransport`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the default timeout
    pub fn new() -> Result<Self, ApiError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a transport with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Request(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn perform(&self, request: HttpRequest) -> Result<serde_json::Value, ApiError> {
        let HttpRequest {
            method,
            url,
            headers,
            query,
            body,
        } = request;

        tracing::debug!("Sending {} request to: {}", method, url);

        let mut builder = self.client.request(method.clone(), &url);
        for (name, value) in headers.iter() {
            builder = builder.header(name, value);
        }
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(fields) => builder.form(&fields),
        };

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Failed to send {} request to {}: {}", method, url, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        tracing::debug!("Received response with status: {}", status);

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(
                "{} {} failed: HTTP {} - {}",
                method,
                url,
                status.as_u16(),
                error_body
            );

            return Err(ApiError::Http {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let response_text = response.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            ApiError::Parse(format!("Failed to read response: {}", e))
        })?;

        parse_body(&response_text)
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
        Box::pin(self.perform(request))
    }
}

pub(crate) fn parse_body(text: &str) -> Result<serde_json::Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(text).map_err(|e| {
        tracing::error!("Failed to parse response: {} - Response body: {}", e, text);
        ApiError::Parse(format!("Failed to parse response JSON: {}", e))
    })
}
