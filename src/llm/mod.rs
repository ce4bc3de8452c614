pub mod openai;

pub use openai::OpenAiClient;

use async_trait::async_trait;

/// One chat-style completion: a system role plus a single user prompt.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
}

/// Text completion service. Returns the raw generated text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<String>;

    fn provider_name(&self) -> &'static str;
}
