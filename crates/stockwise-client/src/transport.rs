//! # HTTP Transport
//!
//! The single seam between the client and the network.
//!
//! ## Request Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Request Path                                    │
//! │                                                                         │
//! │  Resource / Mutations / Advisor / Exporter                             │
//! │        │  ApiRequest { method, path, query, body }                     │
//! │        ▼                                                                │
//! │  ┌────────────┐   status + error mapping   ┌────────────────────────┐  │
//! │  │    Api     │ ─────────────────────────► │  Arc<dyn Backend>      │  │
//! │  │ (execute)  │ ◄───────────────────────── │  HttpBackend (reqwest) │  │
//! │  └────────────┘   ApiResponse {status,body}│  or an in-memory fake  │  │
//! │                                            └────────────────────────┘  │
//! │                                                                         │
//! │  Backend::send returns Err ONLY when no HTTP response exists.          │
//! │  Non-2xx is an Ok(ApiResponse) and is classified by Api::execute.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No request is ever retried here.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::config::ApiSettings;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Request / Response
// =============================================================================

/// HTTP verbs used by the StockWise API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Patch => write!(f, "PATCH"),
        }
    }
}

/// A backend call, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path starting with `/`, e.g. `/skus/{id}/stock`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attaches a JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> ClientResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Looks up a query parameter.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// What came back from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The backend's `{error}` field, if the body carries one.
    pub fn error_message(&self) -> Option<String> {
        serde_json::from_slice::<Value>(&self.body)
            .ok()?
            .get("error")?
            .as_str()
            .map(str::to_string)
    }
}

// =============================================================================
// Backend Trait
// =============================================================================

/// Sends one request and returns the raw response.
///
/// ## Contract
/// - `Err` means the request produced no HTTP response at all
/// - Any status code, 2xx or not, is `Ok`
#[async_trait]
pub trait Backend: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse>;
}

/// reqwest-backed [`Backend`] for the real server.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
    request_timeout: Option<std::time::Duration>,
}

impl HttpBackend {
    /// Creates a backend from API settings.
    pub fn new(settings: &ApiSettings) -> ClientResult<Self> {
        let base_url = settings.parsed_base_url()?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout())
            .user_agent(settings.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url,
            request_timeout: settings.request_timeout(),
        })
    }

    /// Appends the request path to the base URL path one segment at a time.
    ///
    /// Segments are percent-encoded, so `?` and `#` never start a query or
    /// fragment, and `.`/`..` segments are skipped.
    fn endpoint(&self, request: &ApiRequest) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidUrl(format!("API URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(request.path.split('/').filter(|segment| !segment.is_empty()));

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let url = self.endpoint(&request)?;
        let request_id = Uuid::new_v4();

        debug!(
            %request_id,
            method = %request.method,
            path = %request.path,
            "Sending request"
        );

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
        };

        let mut builder = self
            .client
            .request(method, url)
            .header("x-request-id", request_id.to_string());

        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(%request_id, path = %request.path, error = %e, "Request failed");
            ClientError::from(e)
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(%request_id, path = %request.path, status, bytes = body.len(), "Response received");

        Ok(ApiResponse { status, body })
    }
}

// =============================================================================
// Api Handle
// =============================================================================

/// Shared handle over a [`Backend`] with status classification.
#[derive(Clone)]
pub struct Api {
    backend: Arc<dyn Backend>,
}

impl Api {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Sends without classifying the status.
    pub async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        self.backend.send(request).await
    }

    /// Sends and turns non-2xx into [`ClientError::Http`].
    ///
    /// The backend's `{error}` is used verbatim; otherwise the message is
    /// `"<action> failed, status <code>"`.
    pub async fn execute(&self, action: &str, request: ApiRequest) -> ClientResult<ApiResponse> {
        let path = request.path.clone();
        let response = self.backend.send(request).await?;

        if response.is_success() {
            return Ok(response);
        }

        warn!(action, path = %path, status = response.status, "Backend rejected request");
        Err(match response.error_message() {
            Some(message) => ClientError::Http {
                status: response.status,
                message,
            },
            None => ClientError::status(action, response.status),
        })
    }

    /// [`Api::execute`] followed by JSON decoding of the body.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        action: &str,
        request: ApiRequest,
    ) -> ClientResult<T> {
        let response = self.execute(action, request).await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// `GET /health`.
    pub async fn health(&self) -> ClientResult<stockwise_core::HealthStatus> {
        self.execute_json("Health check", ApiRequest::get("/health"))
            .await
    }
}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api").finish_non_exhaustive()
    }
}
