//! Outgoing request descriptors.
//!
//! An [`ApiRequest`] is plain data until [`crate::ApiClient::send`] runs the
//! outbound interceptor on it and hands it to `reqwest`. Keeping it inspectable
//! lets the header rules be tested without a network.

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

/// Body of an outgoing request.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// JSON document, serialized at dispatch.
    Json(serde_json::Value),
    /// `multipart/form-data`; the transport writes the boundary header.
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Whether this is a multipart upload.
    #[must_use]
    pub const fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}

/// One field of a multipart form.
#[derive(Debug, Clone)]
pub enum FormPart {
    /// Plain text field.
    Text {
        /// Field name.
        name: String,
        /// Field value.
        value: String,
    },
    /// File field.
    File {
        /// Field name.
        name: String,
        /// File name sent to the backend.
        file_name: String,
        /// MIME type, if known.
        mime: Option<String>,
        /// File contents.
        bytes: Vec<u8>,
    },
}

/// An inspectable multipart form.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Add a file field.
    #[must_use]
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: Option<&str>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            mime: mime.map(str::to_owned),
            bytes,
        });
        self
    }

    /// Fields in insertion order.
    #[must_use]
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|part| match part {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name.as_str(),
        })
    }

    pub(crate) fn into_reqwest(self) -> Result<reqwest::multipart::Form, reqwest::Error> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File {
                    name,
                    file_name,
                    mime,
                    bytes,
                } => {
                    let mut file = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
                    if let Some(mime) = mime {
                        file = file.mime_str(&mime)?;
                    }
                    form.part(name, file)
                }
            };
        }
        Ok(form)
    }
}

/// Method and path of a request, kept on errors for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    /// HTTP method.
    pub method: Method,
    /// Path as given by the caller, without base URL or query.
    pub path: String,
}

impl std::fmt::Display for RequestSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// A request on its way to the backend.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) headers: HeaderMap,
    pub(crate) body: RequestBody,
    /// First construction error; reported when the request is sent.
    pub(crate) error: Option<String>,
}

impl ApiRequest {
    /// New request with no headers and no body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            error: None,
        }
    }

    /// Append a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set a header, replacing any previous value.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => self.fail(format!("invalid header {name}")),
        }
        self
    }

    /// Use `body` serialized as JSON.
    #[must_use]
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = RequestBody::Json(value),
            Err(e) => self.fail(format!("request body is not serializable: {e}")),
        }
        self
    }

    /// Use a multipart form body.
    #[must_use]
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    fn fail(&mut self, message: String) {
        self.error.get_or_insert(message);
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Path as given by the caller.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters.
    #[must_use]
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Current headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable headers, for interceptors.
    pub const fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Body.
    #[must_use]
    pub const fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Construction error recorded by a builder method, if any.
    #[must_use]
    pub fn setup_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Method and path for diagnostics.
    #[must_use]
    pub fn summary(&self) -> RequestSummary {
        RequestSummary {
            method: self.method.clone(),
            path: self.path.clone(),
        }
    }
}

/// Join the base URL, path and query into the final URL.
///
/// An empty base means the path must already be absolute. Absolute paths are
/// used as-is whatever the base.
pub(crate) fn resolve_url(
    base_url: &str,
    path: &str,
    query: &[(String, String)],
) -> Result<url::Url, String> {
    let is_absolute = path.starts_with("http://") || path.starts_with("https://");
    let raw = if base_url.is_empty() || is_absolute {
        path.to_owned()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    };

    let mut url = url::Url::parse(&raw).map_err(|e| format!("invalid request URL {raw:?}: {e}"))?;
    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    Ok(url)
}
