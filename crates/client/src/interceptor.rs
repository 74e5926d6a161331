//! Hooks run on every request and every outcome.
//!
//! The outbound hook attaches the bearer token and fixes the content type for
//! multipart uploads. It never fails: a request that cannot be decorated is
//! sent as-is. The inbound hook only logs. Headers and bodies are never
//! logged, only method, base URL, path, status and error payloads.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use secrecy::ExposeSecret;
use tracing::{debug, error, info, warn};

use crate::client::ApiResponse;
use crate::error::ApiError;
use crate::request::ApiRequest;
use crate::session::SessionContext;

/// Decorate `request` from the current session just before dispatch.
pub fn on_request(request: &mut ApiRequest, session: &SessionContext, base_url: &str) {
    attach_bearer_token(request, session);

    // reqwest only writes its boundary-bearing content type when none is set.
    if request.body().is_multipart() {
        request.headers_mut().remove(CONTENT_TYPE);
    }

    let base_url = if base_url.is_empty() { "<none>" } else { base_url };
    info!(
        method = %request.method(),
        base_url = %base_url,
        path = %request.path(),
        "API request"
    );
}

fn attach_bearer_token(request: &mut ApiRequest, session: &SessionContext) {
    let token = match session.token() {
        Ok(Some(token)) => token,
        Ok(None) => {
            request.headers_mut().remove(AUTHORIZATION);
            return;
        }
        Err(e) => {
            warn!(error = %e, "Session unreadable, sending request without token");
            request.headers_mut().remove(AUTHORIZATION);
            return;
        }
    };

    match HeaderValue::from_str(&format!("Bearer {}", token.expose_secret())) {
        Ok(mut value) => {
            value.set_sensitive(true);
            request.headers_mut().insert(AUTHORIZATION, value);
        }
        Err(_) => {
            warn!("Stored token is not a valid header value, sending request without it");
            request.headers_mut().remove(AUTHORIZATION);
        }
    }
}

/// Log a successful response.
pub fn on_response(response: &ApiResponse) {
    info!(
        status = response.status().as_u16(),
        path = %response.request().path,
        "API response"
    );
}

/// Log a failure. The caller returns the error unchanged afterwards.
pub fn on_error(err: &ApiError) {
    match err {
        ApiError::Server { request, response } => error!(
            status = response.status.as_u16(),
            path = %request.path,
            payload = %response.payload,
            "API error response"
        ),
        ApiError::Network { request, source } => error!(
            method = %request.method,
            path = %request.path,
            error = %source,
            "API request got no response"
        ),
        ApiError::Setup { message } => error!(error = %message, "API request setup failed"),
        ApiError::Decode {
            request,
            status,
            source,
        } => error!(
            status = status.as_u16(),
            path = %request.path,
            error = %source,
            "API response body did not match expected shape"
        ),
        ApiError::Session(e) => debug!(error = %e, "Session error before dispatch"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use reqwest::{Method, StatusCode};
    use secrecy::SecretString;
    use workpro_core::{SessionKey, UserProfile};

    use super::*;
    use crate::error::ErrorResponse;
    use crate::request::{MultipartForm, RequestSummary};
    use crate::session::SessionError;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Capture {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    /// Run `f` with a DEBUG-level subscriber and return what it logged.
    fn capture_logs(f: impl FnOnce()) -> String {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        capture.text()
    }

    fn summary(method: Method, path: &str) -> RequestSummary {
        RequestSummary {
            method,
            path: path.to_owned(),
        }
    }

    fn signed_in(token: &str) -> SessionContext {
        let session = SessionContext::in_memory();
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "_id": "u-1",
            "email": "ada@corp.io",
        }))
        .unwrap();
        session
            .sign_in(&SecretString::from(token.to_owned()), &profile)
            .unwrap();
        session
    }

    fn json_request() -> ApiRequest {
        ApiRequest::new(Method::POST, "/api/tasks")
            .header("content-type", "application/json")
            .json(&serde_json::json!({"title": "Task A"}))
    }

    #[test]
    fn test_token_becomes_bearer_header() {
        let mut request = json_request();
        on_request(&mut request, &signed_in("abc123"), "");

        let auth = request.headers().get(AUTHORIZATION).unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer abc123");
        assert!(auth.is_sensitive());
        assert_eq!(
            request.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_no_token_no_header() {
        let mut request = json_request().header("authorization", "Bearer stale");
        on_request(&mut request, &SessionContext::in_memory(), "");
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_multipart_drops_json_content_type() {
        let mut request = ApiRequest::new(Method::POST, "/api/users/profile-pic")
            .header("content-type", "application/json")
            .multipart(MultipartForm::new().file("profilePic", "me.png", None, vec![0]));

        on_request(&mut request, &signed_in("abc123"), "");

        assert!(request.headers().get(CONTENT_TYPE).is_none());
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer abc123"
        );
    }

    #[test]
    fn test_unusable_token_is_skipped_not_fatal() {
        let mut request = json_request();
        on_request(&mut request, &signed_in("bad\ntoken"), "");
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_request_log_has_route_but_no_secrets() {
        let mut request = json_request();
        let logged = capture_logs(|| {
            on_request(&mut request, &signed_in("abc123"), "https://api.workpro.io");
        });

        assert!(logged.contains("API request"));
        assert!(logged.contains("POST"));
        assert!(logged.contains("https://api.workpro.io"));
        assert!(logged.contains("/api/tasks"));
        assert!(!logged.contains("abc123"));
        assert!(!logged.contains("Task A"));
    }

    #[test]
    fn test_response_log_has_status_and_path() {
        let response = ApiResponse {
            request: summary(Method::GET, "/api/tasks"),
            status: StatusCode::OK,
            body: br#"{"secret":"body"}"#.to_vec(),
        };

        let logged = capture_logs(|| on_response(&response));

        assert!(logged.contains("API response"));
        assert!(logged.contains("status=200"));
        assert!(logged.contains("/api/tasks"));
        assert!(!logged.contains("secret"));
    }

    #[test]
    fn test_server_error_log_has_status_path_and_payload_but_no_token() {
        let session = signed_in("abc123");
        let err = ApiError::Server {
            request: summary(Method::GET, "/api/admin/analytics"),
            response: ErrorResponse {
                status: StatusCode::FORBIDDEN,
                payload: serde_json::json!({"message": "Access denied"}),
            },
        };

        let logged = capture_logs(|| {
            let mut request = ApiRequest::new(Method::GET, "/api/admin/analytics");
            on_request(&mut request, &session, "https://api.workpro.io");
            on_error(&err);
        });

        assert!(logged.contains("API error response"));
        assert!(logged.contains("status=403"));
        assert!(logged.contains("/api/admin/analytics"));
        assert!(logged.contains("Access denied"));
        assert!(logged.contains("ERROR"));
        assert!(!logged.contains("abc123"));
    }

    #[test]
    fn test_network_error_log_says_no_response() {
        let source = reqwest::Client::new()
            .get("http://[::1")
            .build()
            .unwrap_err();
        let err = ApiError::Network {
            request: summary(Method::POST, "/api/tasks"),
            source,
        };

        let logged = capture_logs(|| on_error(&err));

        assert!(logged.contains("API request got no response"));
        assert!(logged.contains("POST"));
        assert!(logged.contains("/api/tasks"));
        assert!(!logged.contains("status="));
    }

    #[test]
    fn test_setup_error_log_has_message() {
        let err = ApiError::Setup {
            message: "no company selected".to_owned(),
        };

        let logged = capture_logs(|| on_error(&err));

        assert!(logged.contains("API request setup failed"));
        assert!(logged.contains("no company selected"));
    }

    #[test]
    fn test_decode_error_log_has_status_and_path() {
        let source = serde_json::from_str::<Vec<String>>("{}").unwrap_err();
        let err = ApiError::Decode {
            request: summary(Method::GET, "/api/pricing"),
            status: StatusCode::OK,
            source,
        };

        let logged = capture_logs(|| on_error(&err));

        assert!(logged.contains("did not match expected shape"));
        assert!(logged.contains("status=200"));
        assert!(logged.contains("/api/pricing"));
    }

    #[test]
    fn test_session_error_is_logged_at_debug() {
        let err = ApiError::Session(SessionError::InvalidValue {
            key: SessionKey::CompanyRole,
            reason: "unknown role".to_owned(),
        });

        let logged = capture_logs(|| on_error(&err));

        assert!(logged.contains("DEBUG"));
        assert!(logged.contains("Session error before dispatch"));
        assert!(logged.contains("companyRole"));
    }
}
