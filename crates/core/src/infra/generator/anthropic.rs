use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{http_client, send_json, GenerateError, TextGenerator};
use crate::domain::types::TextPrompts;
use crate::infra::config::EndpointConfig;

const PROVIDER: &str = "Anthropic";
const MODEL: &str = "claude-3-5-sonnet-20241022";
const MAX_TOKENS: u32 = 1024;
const API_VERSION: &str = "2023-06-01";

/// Anthropic Messages API を使用したテキスト生成
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct MessageRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessageResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

impl AnthropicClient {
    pub fn new(api_key: String, endpoints: &EndpointConfig) -> Self {
        Self {
            client: http_client(endpoints.generation_timeout),
            api_key,
            base_url: endpoints.anthropic_base_url.clone(),
        }
    }
}

fn message_text(response: MessageResponse) -> Result<String, GenerateError> {
    let text = response
        .content
        .into_iter()
        .filter_map(|block| block.text)
        .collect::<Vec<_>>()
        .join("");
    let text = text.trim();

    if text.is_empty() {
        return Err(GenerateError::EmptyResponse(PROVIDER));
    }
    Ok(text.to_string())
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    async fn generate(&self, prompts: &TextPrompts) -> Result<String, GenerateError> {
        let body = MessageRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system: &prompts.system,
            messages: vec![Message {
                role: "user",
                content: &prompts.user,
            }],
        };

        let request = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body);

        let response: MessageResponse = send_json(request, PROVIDER).await?;
        message_text(response)
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}
