//! Chat-completion client
//!
//! One POST per call to the configured completion endpoint; only the first
//! choice's text is kept.

use async_graphql::InputObject;
use serde::{Deserialize, Serialize};

use super::error::GatewayError;
use crate::config::CompletionConfig;
use crate::logger;

/// Returned when the upstream answers successfully but without any text
pub const NO_CONTENT_PLACEHOLDER: &str = "No content returned";

/// A single chat message, as sent upstream and accepted from callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, InputObject)]
#[graphql(name = "MessageInput")]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl CompletionResponse {
    /// Text of the first choice; empty text counts as absent
    fn into_first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()?
            .message?
            .content
            .filter(|c| !c.is_empty())
    }
}

/// Client for the upstream chat-completions endpoint
#[derive(Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl CompletionClient {
    pub fn new(http: reqwest::Client, config: &CompletionConfig) -> Self {
        Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Send `messages` upstream and return the first completion's text
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GatewayError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: &self.model,
                messages,
            })
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            logger::log_completion_failed(status.as_u16(), &body);
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let data: CompletionResponse = response.json().await.map_err(GatewayError::Decode)?;
        let content = data
            .into_first_content()
            .unwrap_or_else(|| NO_CONTENT_PLACEHOLDER.to_string());
        logger::log_completion(&content);
        Ok(content)
    }
}
