use super::{CompletionClient, CompletionRequest};
use crate::config::OpenAiConfig;
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

/// Chat completions client. No timeout or retry is applied.
pub struct OpenAiClient {
    model: String,
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig) -> Self {
        Self {
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn body(&self, request: &CompletionRequest) -> serde_json::Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.prompt },
            ],
            "temperature": request.temperature,
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<String> {
        debug!(
            model = %self.model,
            prompt_len = request.prompt.len(),
            "Requesting completion"
        );

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.body(request))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            warn!(%status, "Completion request failed");
            anyhow::bail!("OpenAI chat API error ({}): {}", status, error_text);
        }

        let json: serde_json::Value = resp.json().await?;
        content_of(&json)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

fn content_of(json: &serde_json::Value) -> anyhow::Result<String> {
    json.pointer("/choices/0/message/content")
        .and_then(|v| v.as_str())
        .map(String::from)
        .ok_or_else(|| anyhow::anyhow!("OpenAI API response missing content"))
}
