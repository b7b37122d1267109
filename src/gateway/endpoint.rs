//! GraphQL over HTTP
//!
//! Turns an HTTP request on the API path into a GraphQL request, executes it
//! and maps the outcome onto a status code:
//! - success: 200 with `{ "data": ... }`
//! - malformed request, parse or validation error: 400 with the error envelope
//! - any resolver failure: 500 with the error envelope

use async_graphql::http::GraphiQLSource;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, ALLOW, CONTENT_LENGTH};
use hyper::{Method, Request, Response, StatusCode};

use super::GatewaySchema;
use crate::config::AppState;
use crate::http::{self, ErrorEnvelope};
use crate::logger;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Handle one request addressed to the query gateway
pub async fn handle_gateway_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let method = req.method().clone();
    let gql_request = match method {
        Method::GET => match req.uri().query().filter(|q| !q.is_empty()) {
            Some(query) => match async_graphql::http::parse_query_string(query) {
                Ok(r) => r,
                Err(e) => return bad_request(&e.to_string()),
            },
            None if state.config.gateway.graphiql => {
                let page = GraphiQLSource::build().endpoint(req.uri().path()).finish();
                return http::build_html_response(page);
            }
            None => return bad_request("Missing GraphQL query"),
        },
        Method::POST => match read_json_body(req, state.config.gateway.max_body_size).await {
            Ok(r) => r,
            Err(resp) => return resp,
        },
        _ => {
            logger::log_warning(&format!("Method not allowed on API path: {method}"));
            let mut resp = http::build_error_envelope(
                StatusCode::METHOD_NOT_ALLOWED,
                "Only GET and POST are supported",
            );
            resp.headers_mut()
                .insert(ALLOW, HeaderValue::from_static("GET, POST, OPTIONS"));
            return resp;
        }
    };

    execute(&state.schema, gql_request).await
}

/// Run the request against the schema and shape the HTTP response
async fn execute(schema: &GatewaySchema, request: async_graphql::Request) -> Response<Full<Bytes>> {
    let response = schema.execute(request).await;

    if response.errors.is_empty() {
        return http::build_json_response(StatusCode::OK, &response);
    }

    // Resolver errors carry the path of the failed field; request errors do not
    let status = if response.errors.iter().any(|e| !e.path.is_empty()) {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::BAD_REQUEST
    };

    let envelope = ErrorEnvelope::new(response.errors.into_iter().map(|e| e.message));
    http::build_json_response(status, &envelope)
}

/// Read and decode a JSON GraphQL body, enforcing the size limit
async fn read_json_body<B>(
    req: Request<B>,
    max_body_size: u64,
) -> Result<async_graphql::Request, Response<Full<Bytes>>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    if declared_length(&req).is_some_and(|len| len > max_body_size) {
        return Err(payload_too_large(max_body_size));
    }

    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    let bytes = match Limited::new(req.into_body(), limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => return Err(payload_too_large(max_body_size)),
        Err(e) => return Err(bad_request(&format!("Failed to read request body: {e}"))),
    };

    serde_json::from_slice(&bytes).map_err(|e| bad_request(&format!("Invalid GraphQL request: {e}")))
}

fn declared_length<B>(req: &Request<B>) -> Option<u64> {
    req.headers()
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn bad_request(message: &str) -> Response<Full<Bytes>> {
    logger::log_warning(&format!("[Gateway] Bad request: {message}"));
    http::build_error_envelope(StatusCode::BAD_REQUEST, message)
}

fn payload_too_large(max_body_size: u64) -> Response<Full<Bytes>> {
    logger::log_warning(&format!(
        "[Gateway] Request body exceeds {max_body_size} bytes"
    ));
    http::build_error_envelope(
        StatusCode::PAYLOAD_TOO_LARGE,
        &format!("Request body exceeds {max_body_size} bytes"),
    )
}
