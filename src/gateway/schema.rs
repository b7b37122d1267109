//! Query schema
//!
//! ```graphql
//! type Query {
//!   ask(prompt: String!): String!
//!   chat(messages: [MessageInput!]!): String!
//! }
//! input MessageInput { role: String!, content: String! }
//! ```

use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, Schema};

use super::completion::{ChatMessage, CompletionClient};
use super::Operation;
use crate::logger;

pub type GatewaySchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Ask a single question as the user
    async fn ask(&self, ctx: &Context<'_>, prompt: String) -> async_graphql::Result<String> {
        run(ctx, Operation::Ask { prompt }).await
    }

    /// Continue a conversation given its full message history
    async fn chat(
        &self,
        ctx: &Context<'_>,
        messages: Vec<ChatMessage>,
    ) -> async_graphql::Result<String> {
        run(ctx, Operation::Chat { messages }).await
    }
}

async fn run(ctx: &Context<'_>, operation: Operation) -> async_graphql::Result<String> {
    let client = ctx.data::<CompletionClient>()?;
    let name = operation.name();
    operation.execute(client).await.map_err(|e| {
        logger::log_error(&format!("[Gateway] {name} failed: {e}"));
        async_graphql::Error::new(e.to_string())
    })
}

pub fn build_schema(client: CompletionClient) -> GatewaySchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(client)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdl_exposes_both_operations() {
        let client = CompletionClient::new(
            reqwest::Client::new(),
            &crate::config::tests::stub_config("http://127.0.0.1:1").completion,
        );
        let sdl = build_schema(client).sdl();
        assert!(sdl.contains("ask(prompt: String!): String!"));
        assert!(sdl.contains("chat(messages: [MessageInput!]!): String!"));
        assert!(sdl.contains("input MessageInput"));
    }
}
