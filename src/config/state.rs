// Application state module
// Holds configuration and the per-process resources shared by all requests

use std::time::Duration;

use super::types::Config;
use crate::gateway::{self, CompletionClient, GatewaySchema};

/// Application state
///
/// Built once at startup and shared behind an `Arc`. Nothing in here is
/// mutated after construction, so requests never contend on it.
pub struct AppState {
    pub config: Config,
    /// Client for the static host; redirects are relayed, never followed
    pub static_client: reqwest::Client,
    pub schema: GatewaySchema,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let static_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.site.timeout))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let completion_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.completion.timeout))
            .build()?;
        let completion = CompletionClient::new(completion_client, &config.completion);

        Ok(Self {
            config: config.clone(),
            static_client,
            schema: gateway::build_schema(completion),
        })
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
