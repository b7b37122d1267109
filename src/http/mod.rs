//! HTTP protocol layer module
//!
//! Response builders and CORS headers shared by the dispatcher, the
//! static-site forwarder and the query gateway.

pub mod cors;
pub mod response;

// Re-export commonly used types
pub use cors::{apply_cors_headers, build_cors_headers};
pub use response::{
    build_204_response, build_error_envelope, build_html_response, build_json_response,
    build_text_response, ErrorEnvelope,
};
