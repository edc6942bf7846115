use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{http_client, send_json, GenerateError, ImageGenerator, TextGenerator};
use crate::domain::types::TextPrompts;
use crate::infra::config::EndpointConfig;

const PROVIDER: &str = "OpenAI";
const IMAGE_PROVIDER: &str = "DALL-E";

const CHAT_MODEL: &str = "gpt-4o";
const CHAT_TEMPERATURE: f32 = 0.78;
const CHAT_MAX_TOKENS: u32 = 1000;

const IMAGE_MODEL: &str = "gpt-image-1";
const IMAGE_SIZE: &str = "1024x1536";
const IMAGE_QUALITY: &str = "high";

/// OpenAI API クライアント（チャット + 画像）
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
    quality: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    b64_json: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: String, endpoints: &EndpointConfig) -> Self {
        Self {
            client: http_client(endpoints.generation_timeout),
            api_key,
            base_url: endpoints.openai_base_url.clone(),
        }
    }

    fn chat_request<'a>(prompts: &'a TextPrompts) -> ChatRequest<'a> {
        ChatRequest {
            model: CHAT_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompts.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompts.user,
                },
            ],
            temperature: CHAT_TEMPERATURE,
            max_tokens: CHAT_MAX_TOKENS,
        }
    }
}

fn chat_text(response: ChatResponse) -> Result<String, GenerateError> {
    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|t| t.trim().to_string())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GenerateError::EmptyResponse(PROVIDER));
    }
    Ok(text)
}

fn image_b64(response: ImageResponse) -> Result<String, GenerateError> {
    response
        .data
        .into_iter()
        .next()
        .and_then(|d| d.b64_json)
        .filter(|b| !b.is_empty())
        .ok_or(GenerateError::EmptyResponse(IMAGE_PROVIDER))
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, prompts: &TextPrompts) -> Result<String, GenerateError> {
        let request = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&Self::chat_request(prompts));

        let response: ChatResponse = send_json(request, PROVIDER).await?;
        chat_text(response)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[async_trait]
impl ImageGenerator for OpenAiClient {
    async fn generate_image(&self, prompt: &str) -> Result<String, GenerateError> {
        let body = ImageRequest {
            model: IMAGE_MODEL,
            prompt,
            n: 1,
            size: IMAGE_SIZE,
            quality: IMAGE_QUALITY,
        };
        let request = self
            .client
            .post(format!("{}/v1/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body);

        let response: ImageResponse = send_json(request, IMAGE_PROVIDER).await?;
        image_b64(response)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_shape() {
        let prompts = TextPrompts {
            system: "sys".to_string(),
            user: "usr".to_string(),
        };
        let json = serde_json::to_value(OpenAiClient::chat_request(&prompts)).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "usr");
    }

    #[test]
    fn test_chat_text_trims() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  Hello post \n"}}]}"#,
        )
        .unwrap();
        assert_eq!(chat_text(resp).unwrap(), "Hello post");
    }

    #[test]
    fn test_chat_text_empty_is_error() {
        let resp: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(chat_text(resp), Err(GenerateError::EmptyResponse(_))));
    }

    #[test]
    fn test_image_b64() {
        let resp: ImageResponse =
            serde_json::from_str(r#"{"created":1,"data":[{"b64_json":"iVBORw0KGgo="}]}"#).unwrap();
        assert_eq!(image_b64(resp).unwrap(), "iVBORw0KGgo=");

        let resp: ImageResponse = serde_json::from_str(r#"{"data":[{"url":"https://x"}]}"#).unwrap();
        let err = image_b64(resp).unwrap_err();
        assert_eq!(err.to_string(), "Empty response from DALL-E");
    }
}
