pub mod anthropic;
mod noop;
pub mod openai;

pub use noop::NoopGenerator;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::domain::error::AppError;
use crate::domain::settings::Provider;
use crate::domain::types::TextPrompts;
use crate::infra::config::EndpointConfig;

/// 生成 API エラー
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// プロバイダが非成功ステータスを返した
    #[error("{provider} error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },
    #[error("{0} request timed out")]
    Timeout(&'static str),
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("Response parse error: {0}")]
    MalformedResponse(String),
    #[error("Empty response from {0}")]
    EmptyResponse(&'static str),
}

impl From<GenerateError> for AppError {
    fn from(e: GenerateError) -> Self {
        match e {
            GenerateError::Timeout(_) => AppError::timeout(e.to_string()),
            _ => AppError::provider(e.to_string()),
        }
    }
}

/// テキスト生成 trait
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompts: &TextPrompts) -> Result<String, GenerateError>;

    fn name(&self) -> &str;
}

/// 画像生成 trait（base64 エンコード済み PNG を返す）
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<String, GenerateError>;

    fn name(&self) -> &str;
}

/// 設定中の認証情報からクライアントを作る
pub trait GeneratorFactory: Send + Sync {
    fn text_generator(&self, provider: Provider, api_key: &str) -> Box<dyn TextGenerator>;

    /// 画像生成はプロバイダ設定に関係なく OpenAI キーを使う
    fn image_generator(&self, openai_key: &str) -> Box<dyn ImageGenerator>;
}

/// 実 HTTP クライアントを返すファクトリ
pub struct HttpGeneratorFactory {
    endpoints: EndpointConfig,
}

impl HttpGeneratorFactory {
    pub fn new(endpoints: EndpointConfig) -> Self {
        Self { endpoints }
    }
}

impl GeneratorFactory for HttpGeneratorFactory {
    fn text_generator(&self, provider: Provider, api_key: &str) -> Box<dyn TextGenerator> {
        match provider {
            Provider::OpenAi => Box::new(openai::OpenAiClient::new(
                api_key.to_string(),
                &self.endpoints,
            )),
            Provider::Anthropic => Box::new(anthropic::AnthropicClient::new(
                api_key.to_string(),
                &self.endpoints,
            )),
        }
    }

    fn image_generator(&self, openai_key: &str) -> Box<dyn ImageGenerator> {
        Box::new(openai::OpenAiClient::new(
            openai_key.to_string(),
            &self.endpoints,
        ))
    }
}

pub(crate) fn http_client(timeout: std::time::Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            log::warn!("HTTP クライアント初期化失敗、既定設定を使用: {e}");
            reqwest::Client::new()
        })
}

/// リクエストを送り、成功時は JSON を型に変換する。
/// 失敗時はプロバイダのエラーペイロードからメッセージを取り出す。
pub(crate) async fn send_json<R: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    provider: &'static str,
) -> Result<R, GenerateError> {
    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            GenerateError::Timeout(provider)
        } else {
            GenerateError::Http(e.to_string())
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GenerateError::Provider {
            provider,
            message: provider_error_message(status, &body),
        });
    }

    response
        .json::<R>()
        .await
        .map_err(|e| GenerateError::MalformedResponse(e.to_string()))
}

/// `{"error":{"message":...}}` があればそれを、無ければステータス理由句を使う
pub fn provider_error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(|s| s.to_string())
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string())
        })
}
