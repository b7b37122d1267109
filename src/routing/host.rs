//! Host classification
//!
//! Decides whether a request (or an origin) targets the local machine.

use hyper::header::HOST;
use hyper::Request;
use std::net::IpAddr;

/// Strip the port from a host, keeping bracketed IPv6 literals intact
///
/// `"example.com:8080"` -> `"example.com"`, `"[::1]:80"` -> `"[::1]"`
pub fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    match host.rsplit_once(':') {
        // A bare IPv6 literal has more than one colon and no port
        Some((name, port)) if !name.contains(':') && port.chars().all(|c| c.is_ascii_digit()) => {
            name
        }
        _ => host,
    }
}

/// Whether `host` names the loopback interface
///
/// Accepts `localhost`, any `*.localhost` name and loopback IP literals,
/// with or without a port.
pub fn is_loopback_host(host: &str) -> bool {
    let host = strip_port(host).trim_end_matches('.');
    let bare = host.trim_start_matches('[').trim_end_matches(']');

    if let Ok(ip) = bare.parse::<IpAddr>() {
        return ip.is_loopback();
    }

    let lower = bare.to_ascii_lowercase();
    lower == "localhost" || lower.ends_with(".localhost")
}

/// Host the client addressed: the URI authority, else the `Host` header
pub fn request_host<B>(req: &Request<B>) -> Option<&str> {
    req.uri().host().or_else(|| {
        req.headers()
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .map(strip_port)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_port() {
        assert_eq!(strip_port("example.com:8080"), "example.com");
        assert_eq!(strip_port("example.com"), "example.com");
        assert_eq!(strip_port("127.0.0.1:8787"), "127.0.0.1");
        assert_eq!(strip_port("[::1]:3000"), "[::1]");
        assert_eq!(strip_port("::1"), "::1");
    }

    #[test]
    fn test_loopback_names() {
        assert!(is_loopback_host("localhost"));
        assert!(is_loopback_host("LOCALHOST:8080"));
        assert!(is_loopback_host("app.localhost"));
        assert!(!is_loopback_host("localhost.example.com"));
        assert!(!is_loopback_host("example.com"));
    }

    #[test]
    fn test_loopback_addresses() {
        assert!(is_loopback_host("127.0.0.1"));
        assert!(is_loopback_host("127.0.0.1:8787"));
        assert!(is_loopback_host("127.1.2.3"));
        assert!(is_loopback_host("[::1]"));
        assert!(is_loopback_host("[::1]:3000"));
        assert!(is_loopback_host("::1"));
        assert!(!is_loopback_host("10.0.0.1"));
        assert!(!is_loopback_host("[2001:db8::1]"));
    }

    #[test]
    fn test_request_host_prefers_authority() {
        let req = Request::builder()
            .uri("http://localhost:8787/api/graphql")
            .header(HOST, "example.com")
            .body(())
            .unwrap();
        assert_eq!(request_host(&req), Some("localhost"));

        let req = Request::builder()
            .uri("/index.html")
            .header(HOST, "www.example.com:443")
            .body(())
            .unwrap();
        assert_eq!(request_host(&req), Some("www.example.com"));

        let req = Request::builder().uri("/").body(()).unwrap();
        assert_eq!(request_host(&req), None);
    }
}
