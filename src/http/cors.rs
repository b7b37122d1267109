//! CORS header builder
//!
//! Computes the `Access-Control-*` headers for a request origin. Every call
//! produces all four headers; unknown or missing origins get the wildcard.

use hyper::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use hyper::Response;
use reqwest::Url;

use crate::routing::is_loopback_host;

const ALLOW_HEADERS: &str = "Content-Type, Authorization, Accept";
const ALLOW_METHODS: &str = "GET, POST, OPTIONS";

/// Pick the `Access-Control-Allow-Origin` value for `origin`
///
/// Loopback origins and origins ending with `allowed_domain` are echoed,
/// everything else gets `*`.
pub fn allowed_origin<'a>(origin: &'a str, allowed_domain: &str) -> &'a str {
    if origin.is_empty() {
        return "*";
    }

    let origin_is_loopback = Url::parse(origin)
        .ok()
        .and_then(|url| url.host_str().map(is_loopback_host))
        .unwrap_or(false);

    if origin_is_loopback || (!allowed_domain.is_empty() && origin.ends_with(allowed_domain)) {
        origin
    } else {
        "*"
    }
}

/// Build the CORS header set for a request carrying `origin`
pub fn build_cors_headers(origin: Option<&str>, allowed_domain: &str) -> HeaderMap {
    let allow_origin = allowed_origin(origin.unwrap_or_default(), allowed_domain);

    let mut headers = HeaderMap::with_capacity(4);
    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_str(allow_origin).unwrap_or(HeaderValue::from_static("*")),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers
}

/// Overwrite the response's CORS headers with `cors`
pub fn apply_cors_headers<B>(response: &mut Response<B>, cors: HeaderMap) {
    let headers = response.headers_mut();
    for (name, value) in &cors {
        headers.insert(name, value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_domain_origin_is_echoed() {
        assert_eq!(
            allowed_origin("https://example.com", "example.com"),
            "https://example.com"
        );
        assert_eq!(
            allowed_origin("https://app.example.com", "example.com"),
            "https://app.example.com"
        );
    }

    #[test]
    fn test_loopback_origin_is_echoed() {
        assert_eq!(
            allowed_origin("http://localhost:5173", "example.com"),
            "http://localhost:5173"
        );
        assert_eq!(
            allowed_origin("http://127.0.0.1:8787", "example.com"),
            "http://127.0.0.1:8787"
        );
        assert_eq!(allowed_origin("http://[::1]:3000", ""), "http://[::1]:3000");
    }

    #[test]
    fn test_foreign_origin_gets_wildcard() {
        assert_eq!(allowed_origin("https://evil.test", "example.com"), "*");
        assert_eq!(allowed_origin("https://example.com.evil.test", "example.com"), "*");
        assert_eq!(allowed_origin("https://localhost.evil.test", "example.com"), "*");
    }

    #[test]
    fn test_missing_origin_and_empty_domain() {
        assert_eq!(allowed_origin("", "example.com"), "*");
        assert_eq!(allowed_origin("https://anything.test", ""), "*");
    }

    #[test]
    fn test_header_set_is_complete() {
        let headers = build_cors_headers(None, "example.com");
        assert_eq!(headers.len(), 4);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], ALLOW_HEADERS);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], ALLOW_METHODS);
    }

    #[test]
    fn test_apply_overwrites_existing() {
        let mut response = Response::new(());
        response
            .headers_mut()
            .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("https://old.test"));

        apply_cors_headers(
            &mut response,
            build_cors_headers(Some("https://www.example.com"), "example.com"),
        );
        assert_eq!(
            response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://www.example.com"
        );
        assert_eq!(response.headers().len(), 4);
    }
}
