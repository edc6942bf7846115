use async_trait::async_trait;

use super::{GenerateError, ImageGenerator, TextGenerator};
use crate::domain::types::TextPrompts;

/// 1x1 透過 PNG
const PLACEHOLDER_PNG_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

/// NoopGenerator: API を呼ばずに決まった応答を返すモック実装。
/// オフライン動作確認とテストで使う。
pub struct NoopGenerator;

#[async_trait]
impl TextGenerator for NoopGenerator {
    async fn generate(&self, prompts: &TextPrompts) -> Result<String, GenerateError> {
        Ok(format!("[generated] {}", prompts.user))
    }

    fn name(&self) -> &str {
        "noop"
    }
}

#[async_trait]
impl ImageGenerator for NoopGenerator {
    async fn generate_image(&self, _prompt: &str) -> Result<String, GenerateError> {
        Ok(PLACEHOLDER_PNG_B64.to_string())
    }

    fn name(&self) -> &str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::theme::Theme;
    use crate::domain::types::GeneratedImage;

    #[tokio::test]
    async fn test_noop_text() {
        let prompts = TextPrompts {
            system: "s".to_string(),
            user: "TOPIC: x".to_string(),
        };
        let out = TextGenerator::generate(&NoopGenerator, &prompts).await.unwrap();
        assert_eq!(out, "[generated] TOPIC: x");
    }

    #[tokio::test]
    async fn test_noop_image_is_png() {
        let b64 = NoopGenerator.generate_image("p").await.unwrap();
        let img = GeneratedImage::from_base64(&b64, Theme::Light).unwrap();
        assert_eq!(&img.png[1..4], b"PNG");
    }

    #[test]
    fn test_noop_name() {
        assert_eq!(TextGenerator::name(&NoopGenerator), "noop");
    }
}
