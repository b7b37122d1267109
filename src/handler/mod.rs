//! Request handler module
//!
//! Responsible for request dispatch: CORS preflight, local development
//! shortcuts, static-site forwarding and the query gateway.

pub mod forward;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
