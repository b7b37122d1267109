//! HTTP response building module
//!
//! Provides builders for the responses the router produces itself, decoupled from specific business logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::CONTENT_TYPE;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Build 204 No Content response
pub fn build_204_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("204", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build plain-text response with the given status
pub fn build_text_response(status: StatusCode, text: impl Into<String>) -> Response<Full<Bytes>> {
    let text = text.into();
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from(text.clone())))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from(text)))
        })
}

/// Build generic HTML response
pub fn build_html_response(content: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/html; charset=utf-8")
        .body(Full::new(Bytes::from(content)))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build JSON response
pub fn build_json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_error_envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
            );
        }
    };

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// `{ "errors": [ { "message": ... } ] }`
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub errors: Vec<ErrorMessage>,
}

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            errors: messages
                .into_iter()
                .map(|m| ErrorMessage { message: m.into() })
                .collect(),
        }
    }
}

/// Build the JSON error envelope with a single message
pub fn build_error_envelope(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "errors": [ { "message": message } ] });
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from(body.to_string())))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_error_envelope_shape() {
        let resp = build_error_envelope(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(body_string(resp).await, r#"{"errors":[{"message":"boom"}]}"#);
    }

    #[tokio::test]
    async fn test_envelope_struct_matches_builder() {
        let resp = build_json_response(
            StatusCode::BAD_REQUEST,
            &ErrorEnvelope::new(["first", "second"]),
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_string(resp).await,
            r#"{"errors":[{"message":"first"},{"message":"second"}]}"#
        );
    }

    #[tokio::test]
    async fn test_text_and_no_content() {
        let resp = build_text_response(StatusCode::OK, "hello");
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/plain; charset=utf-8");
        assert_eq!(body_string(resp).await, "hello");

        let resp = build_204_response();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(body_string(resp).await.is_empty());
    }
}
