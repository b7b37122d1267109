use thiserror::Error;

/// Failure of a gateway operation
///
/// The `Display` text is what callers see as the query error message.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Message list must not be empty")]
    EmptyMessages,

    #[error("Completion API error: {status} {body}")]
    Upstream { status: u16, body: String },

    #[error("Completion request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Invalid completion response: {0}")]
    Decode(#[source] reqwest::Error),
}
