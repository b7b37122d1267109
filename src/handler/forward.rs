//! Static-site forwarder
//!
//! Replays a request against the static host with the same method, path,
//! query, headers and body, and returns the upstream response unchanged
//! apart from the HTML charset. No CORS headers are added here.

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE, HOST};
use hyper::{Request, Response, StatusCode, Uri};
use thiserror::Error;

use crate::config::{AppState, SiteConfig};
use crate::http;
use crate::logger;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Connection-scoped headers that must not be relayed by a proxy
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("failed to read request body: {0}")]
    Body(BoxError),

    #[error("request body exceeds {0} bytes")]
    BodyTooLarge(u64),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Forward `req` to the static host
///
/// An oversized request body is answered with 413; any other failure becomes
/// a 500 plain-text response.
pub async fn forward_to_static_site<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let target = build_target_url(&state.config.site, req.uri());
    logger::log_forward(req.method(), &target);

    let max_body_size = state.config.site.max_body_size;
    match try_forward(req, &target, &state.static_client, max_body_size).await {
        Ok(response) => response,
        Err(e @ ForwardError::BodyTooLarge(_)) => {
            logger::log_warning(&format!("[Forward] {target}: {e}"));
            http::build_text_response(StatusCode::PAYLOAD_TOO_LARGE, e.to_string())
        }
        Err(e) => {
            logger::log_forward_failed(&target, &e);
            http::build_text_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Forwarding request failed: {e}"),
            )
        }
    }
}

/// `<scheme>://<static_domain><path><?query>`
pub fn build_target_url(site: &SiteConfig, uri: &Uri) -> String {
    let path_and_query = uri.path_and_query().map_or("/", |pq| pq.as_str());
    format!(
        "{}://{}{}",
        site.static_scheme, site.static_domain, path_and_query
    )
}

async fn try_forward<B>(
    req: Request<B>,
    target: &str,
    client: &reqwest::Client,
    max_body_size: u64,
) -> Result<Response<Full<Bytes>>, ForwardError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let declared = declared_length(req.headers());
    if declared.is_some_and(|len| len > max_body_size) {
        return Err(ForwardError::BodyTooLarge(max_body_size));
    }

    let (parts, body) = req.into_parts();
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    let body = match Limited::new(body, limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => {
            return Err(ForwardError::BodyTooLarge(max_body_size))
        }
        Err(e) => return Err(ForwardError::Body(e)),
    };

    let mut headers = parts.headers;
    strip_hop_by_hop(&mut headers);
    // The client derives both from the target URL and the buffered body
    headers.remove(HOST);
    headers.remove(CONTENT_LENGTH);

    let mut request = client.request(parts.method, target).headers(headers);
    if !body.is_empty() {
        request = request.body(body);
    }

    let upstream = request.send().await?;
    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    let bytes = upstream.bytes().await?;

    strip_hop_by_hop(&mut headers);
    force_html_utf8(&mut headers);

    let mut response = Response::new(Full::new(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers.get(CONTENT_LENGTH)?.to_str().ok()?.parse().ok()
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP {
        headers.remove(name);
    }
}

/// Rewrite any `text/html` content type to `text/html; charset=utf-8`
fn force_html_utf8(headers: &mut HeaderMap) {
    let is_html = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("text/html"));

    if is_html {
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
    }
}
