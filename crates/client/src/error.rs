//! Error types for backend calls.
//!
//! Every failure of [`crate::ApiClient::send`] is an [`ApiError`]. The client
//! logs each one once and then returns it untouched; deciding what the user
//! sees is up to the caller, usually through [`ApiError::user_message`].

use reqwest::StatusCode;
use thiserror::Error;

use crate::request::RequestSummary;
use crate::session::SessionError;

/// Non-2xx response as the backend sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response body: parsed JSON, the raw text as a JSON string when it is
    /// not JSON, or `null` when empty.
    pub payload: serde_json::Value,
}

impl ErrorResponse {
    pub(crate) fn from_body(status: StatusCode, body: &[u8]) -> Self {
        let payload = if body.iter().all(u8::is_ascii_whitespace) {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(body).unwrap_or_else(|_| {
                serde_json::Value::String(String::from_utf8_lossy(body).into_owned())
            })
        };
        Self { status, payload }
    }

    /// The backend's `message` field, if it sent one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.payload
            .get("message")
            .and_then(serde_json::Value::as_str)
            .filter(|m| !m.trim().is_empty())
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {}", self.status)
    }
}

/// Errors that can occur when calling the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("{request} failed with {response}")]
    Server {
        /// The request that failed.
        request: RequestSummary,
        /// Status and payload, unchanged.
        response: ErrorResponse,
    },

    /// No response arrived (connection refused, DNS, timeout).
    #[error("No response for {request}: {source}")]
    Network {
        /// The request that was in flight.
        request: RequestSummary,
        /// Transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The request could not be built, nothing was sent.
    #[error("Request could not be built: {message}")]
    Setup {
        /// What was wrong.
        message: String,
    },

    /// A 2xx response whose body did not have the expected shape.
    #[error("Unexpected response body for {request}: {source}")]
    Decode {
        /// The request that was answered.
        request: RequestSummary,
        /// Status of the response.
        status: StatusCode,
        /// Parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// The session store could not be read or written.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    /// Status code, when a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Server { response, .. } => Some(response.status),
            Self::Decode { status, .. } => Some(*status),
            Self::Network { .. } | Self::Setup { .. } | Self::Session(_) => None,
        }
    }

    /// The request, when one was dispatched.
    #[must_use]
    pub const fn request(&self) -> Option<&RequestSummary> {
        match self {
            Self::Server { request, .. }
            | Self::Network { request, .. }
            | Self::Decode { request, .. } => Some(request),
            Self::Setup { .. } | Self::Session(_) => None,
        }
    }

    /// The error response, for backend failures only.
    #[must_use]
    pub const fn response(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Server { response, .. } => Some(response),
            _ => None,
        }
    }

    /// The backend's `message`, if it sent one.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        self.response().and_then(ErrorResponse::message)
    }

    /// Whether the request never got an answer.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Text to show the user: the backend's message verbatim, else `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message().unwrap_or(fallback).to_owned()
    }
}

/// Free-function form of [`ApiError::user_message`] for call sites that map
/// errors in a closure.
#[must_use]
pub fn to_user_message(error: &ApiError, fallback: &str) -> String {
    error.user_message(fallback)
}
