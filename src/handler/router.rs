//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: classifies the request, runs the
//! matching branch and writes the access log line.

use crate::config::AppState;
use crate::gateway::handle_gateway_request;
use crate::handler::forward::forward_to_static_site;
use crate::http::{self, apply_cors_headers, build_cors_headers};
use crate::logger::{self, AccessLogEntry};
use crate::routing::{classify, request_host, Route};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderMap, ORIGIN};
use hyper::{Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEV_NOTICE: &str = "Local development mode: static site forwarding is disabled";

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let started = Instant::now();
    let entry = state
        .access_log_enabled()
        .then(|| AccessLogEntry::from_request(&req, peer_addr.ip().to_string()));

    let route = classify(
        req.method(),
        request_host(&req),
        req.uri().path(),
        &state.config.gateway.api_prefix,
    );

    let response = dispatch(route, req, &state).await;

    if let Some(mut entry) = entry {
        entry.route = route.as_str();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or_default();
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Run the branch selected by [`classify`]
pub async fn dispatch<B>(route: Route, req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    match route {
        Route::Preflight => {
            let mut response = http::build_204_response();
            apply_cors_headers(&mut response, cors_for(&req, state));
            response
        }
        Route::Favicon => http::build_204_response(),
        Route::DevNotice => {
            logger::log_debug("Local request, skipping static site forwarding");
            http::build_text_response(StatusCode::OK, DEV_NOTICE)
        }
        Route::Forward => forward_to_static_site(req, state).await,
        Route::Gateway => {
            let cors = cors_for(&req, state);
            let mut response = handle_gateway_request(req, state).await;
            apply_cors_headers(&mut response, cors);
            response
        }
    }
}

fn cors_for<B>(req: &Request<B>, state: &AppState) -> HeaderMap {
    let origin = req.headers().get(ORIGIN).and_then(|v| v.to_str().ok());
    build_cors_headers(origin, &state.config.site.domain)
}
