//! Routing module
//!
//! Classifies every request into exactly one dispatcher branch based on
//! method, addressed host and path. Classification is pure; acting on the
//! outcome is the handler's job.

mod host;

pub use host::{is_loopback_host, request_host};

use hyper::Method;

const FAVICON_PATH: &str = "/favicon.ico";

/// Outcome of request classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// CORS preflight: 204 with CORS headers
    Preflight,
    /// Local favicon probe: empty 204
    Favicon,
    /// Local non-API request: development notice instead of forwarding
    DevNotice,
    /// Forward to the static site host
    Forward,
    /// Handle with the query gateway
    Gateway,
}

impl Route {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preflight => "preflight",
            Self::Favicon => "favicon",
            Self::DevNotice => "dev-notice",
            Self::Forward => "forward",
            Self::Gateway => "gateway",
        }
    }
}

/// Classify a request
///
/// Order matters: OPTIONS wins over everything, local hosts never reach the
/// static site, and API paths go to the gateway regardless of host.
pub fn classify(method: &Method, host: Option<&str>, path: &str, api_prefix: &str) -> Route {
    if method == Method::OPTIONS {
        return Route::Preflight;
    }

    let is_api = path.starts_with(api_prefix);
    let is_local = host.is_some_and(is_loopback_host);

    match (is_local, is_api) {
        (_, true) => Route::Gateway,
        (true, false) if path == FAVICON_PATH => Route::Favicon,
        (true, false) => Route::DevNotice,
        (false, false) => Route::Forward,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "/api/";

    #[test]
    fn test_options_always_preflight() {
        for (host, path) in [
            (Some("example.com"), "/"),
            (Some("localhost"), "/api/graphql"),
            (None, "/favicon.ico"),
        ] {
            assert_eq!(classify(&Method::OPTIONS, host, path, PREFIX), Route::Preflight);
        }
    }

    #[test]
    fn test_local_host_branches() {
        let local = Some("127.0.0.1");
        assert_eq!(classify(&Method::GET, local, "/favicon.ico", PREFIX), Route::Favicon);
        assert_eq!(classify(&Method::GET, local, "/", PREFIX), Route::DevNotice);
        assert_eq!(classify(&Method::GET, local, "/api", PREFIX), Route::DevNotice);
        assert_eq!(classify(&Method::POST, local, "/api/graphql", PREFIX), Route::Gateway);
    }

    #[test]
    fn test_remote_host_branches() {
        let remote = Some("www.example.com");
        assert_eq!(classify(&Method::GET, remote, "/", PREFIX), Route::Forward);
        assert_eq!(classify(&Method::GET, remote, "/favicon.ico", PREFIX), Route::Forward);
        assert_eq!(classify(&Method::POST, remote, "/submit", PREFIX), Route::Forward);
        assert_eq!(classify(&Method::GET, remote, "/api/", PREFIX), Route::Gateway);
        assert_eq!(classify(&Method::GET, None, "/about", PREFIX), Route::Forward);
    }

    #[test]
    fn test_custom_prefix() {
        let remote = Some("example.com");
        assert_eq!(classify(&Method::POST, remote, "/graphql", "/graphql"), Route::Gateway);
        assert_eq!(classify(&Method::POST, remote, "/api/x", "/graphql"), Route::Forward);
    }
}
