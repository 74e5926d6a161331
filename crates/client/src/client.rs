//! WorkPro backend API client.
//!
//! One [`ApiClient`] is built at startup and cloned into every consumer so the
//! token, content-type and logging rules live in a single place.
//!
//! # Failure semantics
//!
//! Each call is sent once. There are no retries, no backoff and no timeout
//! beyond the transport's own; failures go straight back to the caller after
//! being logged.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::ClientConfig;
use crate::error::{ApiError, ErrorResponse};
use crate::interceptor;
use crate::request::{ApiRequest, RequestBody, RequestSummary, resolve_url};
use crate::session::SessionContext;

/// Shared, pre-configured backend client.
///
/// Cheap to clone; clones share the connection pool and session.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    /// Empty when request paths are already absolute.
    base_url: String,
    default_headers: HeaderMap,
    session: SessionContext,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

/// Successful (2xx) response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub(crate) request: RequestSummary,
    pub(crate) status: StatusCode,
    pub(crate) body: Vec<u8>,
}

impl ApiResponse {
    /// HTTP status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// The request this answers.
    #[must_use]
    pub const fn request(&self) -> &RequestSummary {
        &self.request
    }

    /// Raw body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|source| ApiError::Decode {
            request: self.request.clone(),
            status: self.status,
            source,
        })
    }
}

impl ApiClient {
    /// Create the client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Setup` if the HTTP client cannot be created.
    pub fn new(config: &ClientConfig, session: SessionContext) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Setup {
                message: format!("HTTP client could not be created: {e}"),
            })?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.base_url.clone(),
                default_headers,
                session,
            }),
        })
    }

    /// Session this client reads its token from.
    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.inner.session
    }

    /// Configured base URL (may be empty).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    // =========================================================================
    // Request builders
    // =========================================================================

    /// Start a request carrying the default headers.
    #[must_use]
    pub fn request(&self, method: Method, path: impl Into<String>) -> ApiRequest {
        let mut request = ApiRequest::new(method, path);
        request
            .headers_mut()
            .extend(self.inner.default_headers.clone());
        request
    }

    /// Start a GET request.
    #[must_use]
    pub fn get(&self, path: impl Into<String>) -> ApiRequest {
        self.request(Method::GET, path)
    }

    /// Start a POST request.
    #[must_use]
    pub fn post(&self, path: impl Into<String>) -> ApiRequest {
        self.request(Method::POST, path)
    }

    /// Start a PUT request.
    #[must_use]
    pub fn put(&self, path: impl Into<String>) -> ApiRequest {
        self.request(Method::PUT, path)
    }

    /// Start a PATCH request.
    #[must_use]
    pub fn patch(&self, path: impl Into<String>) -> ApiRequest {
        self.request(Method::PATCH, path)
    }

    /// Start a DELETE request.
    #[must_use]
    pub fn delete(&self, path: impl Into<String>) -> ApiRequest {
        self.request(Method::DELETE, path)
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Send a request through the interceptors.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Server` for non-2xx responses, `ApiError::Network`
    /// when no response arrives and `ApiError::Setup` when the request cannot
    /// be built. The error is logged before it is returned.
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        interceptor::on_request(&mut request, &self.inner.session, &self.inner.base_url);

        let result = self.dispatch(request).await;
        match &result {
            Ok(response) => interceptor::on_response(response),
            Err(e) => interceptor::on_error(e),
        }
        result
    }

    /// Send a request and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Same as [`Self::send`], plus `ApiError::Decode` if the body does not
    /// match `T`.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        response.json().inspect_err(interceptor::on_error)
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let summary = request.summary();
        let ApiRequest {
            method,
            path,
            query,
            headers,
            body,
            error,
        } = request;

        if let Some(message) = error {
            return Err(ApiError::Setup { message });
        }
        let url = resolve_url(&self.inner.base_url, &path, &query)
            .map_err(|message| ApiError::Setup { message })?;

        let builder = self.inner.http.request(method, url).headers(headers);
        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => {
                let bytes = serde_json::to_vec(&value).map_err(|e| ApiError::Setup {
                    message: format!("request body is not serializable: {e}"),
                })?;
                builder.body(bytes)
            }
            RequestBody::Multipart(form) => {
                let form = form.into_reqwest().map_err(|e| ApiError::Setup {
                    message: format!("multipart form is invalid: {e}"),
                })?;
                builder.multipart(form)
            }
        };

        let response = builder.send().await.map_err(|source| {
            if source.is_builder() {
                ApiError::Setup {
                    message: source.to_string(),
                }
            } else {
                ApiError::Network {
                    request: summary.clone(),
                    source,
                }
            }
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| ApiError::Network {
                request: summary.clone(),
                source,
            })?;

        if status.is_success() {
            Ok(ApiResponse {
                request: summary,
                status,
                body: body.to_vec(),
            })
        } else {
            Err(ApiError::Server {
                request: summary,
                response: ErrorResponse::from_body(status, &body),
            })
        }
    }
}
