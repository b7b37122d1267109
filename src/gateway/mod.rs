//! Query gateway module
//!
//! Exposes `ask` and `chat` over a GraphQL endpoint. Each operation makes
//! exactly one call to the upstream chat-completion API.

mod completion;
mod endpoint;
mod error;
mod schema;

pub use completion::CompletionClient;
pub use endpoint::handle_gateway_request;
pub use schema::{build_schema, GatewaySchema};

use completion::ChatMessage;
use error::GatewayError;

use crate::logger;

/// A gateway operation with its validated-on-execute arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Ask { prompt: String },
    Chat { messages: Vec<ChatMessage> },
}

impl Operation {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ask { .. } => "ask",
            Self::Chat { .. } => "chat",
        }
    }

    /// Message list to send upstream
    fn into_messages(self) -> Result<Vec<ChatMessage>, GatewayError> {
        match self {
            Self::Ask { prompt } => Ok(vec![ChatMessage::user(prompt)]),
            Self::Chat { messages } if messages.is_empty() => Err(GatewayError::EmptyMessages),
            Self::Chat { messages } => Ok(messages),
        }
    }

    pub async fn execute(self, client: &CompletionClient) -> Result<String, GatewayError> {
        let name = self.name();
        let messages = self.into_messages()?;
        logger::log_gateway_operation(name, &format!("{} message(s)", messages.len()));
        client.complete(&messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_wraps_prompt_as_user_message() {
        let messages = Operation::Ask {
            prompt: "hello".to_string(),
        }
        .into_messages()
        .unwrap();
        assert_eq!(messages, vec![ChatMessage::user("hello")]);
    }

    #[test]
    fn test_chat_passes_messages_verbatim() {
        let history = vec![
            ChatMessage {
                role: "system".to_string(),
                content: "be brief".to_string(),
            },
            ChatMessage::user("hi"),
        ];
        let messages = Operation::Chat {
            messages: history.clone(),
        }
        .into_messages()
        .unwrap();
        assert_eq!(messages, history);
    }

    #[test]
    fn test_empty_chat_is_rejected() {
        let err = Operation::Chat { messages: vec![] }
            .into_messages()
            .unwrap_err();
        assert!(matches!(err, GatewayError::EmptyMessages));
    }
}
