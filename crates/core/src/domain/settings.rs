use serde::{Deserialize, Serialize};

/// 文体サンプルの既定値（ユーザーが未設定の場合に使う）
pub const DEFAULT_STYLE_POST: &str = "For years, organizations treated modernization as a finish line: migrate the data center, upgrade the platform, rewrite the application, declare victory. But technology, markets, and customer expectations now evolve faster than any one-time transformation can keep up with.

The real shift is toward continuous modernization — where architecture, processes, and culture are designed to adapt by default.

AI automation is becoming a major accelerator here. Not because it replaces people, but because it removes the repetitive work that keeps teams stuck in maintenance mode: manual testing, ticket triage, incident response, environment provisioning, documentation, and more. When those burdens shrink, teams can focus on resilience, scalability, security, and innovation.

But tools alone don't create speed. Alignment to business outcomes does. The organizations moving fastest aren't the ones with the newest technology — they're the ones with clear priorities, empowered teams, strong governance, and leadership willing to fund long-term capability instead of short-term fixes.

Modernization succeeds when it becomes part of how the organization operates every day — not something that gets scheduled every five years.

Curious how others are embedding continuous modernization and AI automation into their operating model rather than treating it as another transformation program.";

/// 生成設定（永続化される設定 blob）
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    /// テキスト生成に使うプロバイダ
    pub provider: Provider,
    /// OpenAI API キー（画像生成は常にこちらを使う）
    pub openai_key: String,
    /// Anthropic API キー
    pub anthropic_key: String,
    pub tone: Tone,
    /// 長さバケット（1|2|3）
    pub length: PostLength,
    pub use_emoji: bool,
    pub use_hashtags: bool,
    /// 直近のプロンプトを表示するか（デバッグ用）
    pub show_prompts: bool,
    /// 文体サンプル
    pub style_post: String,
    /// 著者/役割コンテキスト
    pub role_context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Anthropic,
}

impl Provider {
    pub fn display_name(self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Anthropic => "Anthropic",
        }
    }
}

/// 文章のトーン。未知のラベルは conversational として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tone {
    Professional,
    Conversational,
    Inspirational,
    Analytical,
    Storytelling,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Professional,
        Tone::Conversational,
        Tone::Inspirational,
        Tone::Analytical,
        Tone::Storytelling,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Conversational => "conversational",
            Tone::Inspirational => "inspirational",
            Tone::Analytical => "analytical",
            Tone::Storytelling => "storytelling",
        }
    }

    /// プロンプトに埋め込む説明句
    pub fn phrase(self) -> &'static str {
        match self {
            Tone::Professional => "professional and authoritative",
            Tone::Conversational => "conversational and engaging",
            Tone::Inspirational => "inspirational and motivational",
            Tone::Analytical => "analytical and data-driven",
            Tone::Storytelling => "storytelling and personal",
        }
    }

    pub fn parse(label: &str) -> Option<Tone> {
        Tone::ALL.into_iter().find(|t| t.as_str() == label)
    }
}

impl From<String> for Tone {
    fn from(label: String) -> Self {
        Tone::parse(&label).unwrap_or(Tone::Conversational)
    }
}

impl From<Tone> for String {
    fn from(tone: Tone) -> Self {
        tone.as_str().to_string()
    }
}

/// 長さバケット。保存形式は 1|2|3 の数値、範囲外は Medium。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum PostLength {
    Short,
    Medium,
    Long,
}

impl PostLength {
    /// 目標文字数レンジ
    pub fn char_target(self) -> &'static str {
        match self {
            PostLength::Short => "300–500",
            PostLength::Medium => "700–1000",
            PostLength::Long => "1200–1500",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PostLength::Short => "Short (300–500 chars)",
            PostLength::Medium => "Medium (700–1000 chars)",
            PostLength::Long => "Long (1200–1500 chars)",
        }
    }

    pub fn level(self) -> i64 {
        match self {
            PostLength::Short => 1,
            PostLength::Medium => 2,
            PostLength::Long => 3,
        }
    }
}

impl From<i64> for PostLength {
    fn from(level: i64) -> Self {
        match level {
            1 => PostLength::Short,
            3 => PostLength::Long,
            _ => PostLength::Medium,
        }
    }
}

impl From<PostLength> for i64 {
    fn from(length: PostLength) -> Self {
        length.level()
    }
}

impl GenerationSettings {
    /// 選択中プロバイダの API キー（空なら None）
    pub fn active_api_key(&self) -> Option<&str> {
        let key = match self.provider {
            Provider::OpenAi => self.openai_key.as_str(),
            Provider::Anthropic => self.anthropic_key.as_str(),
        };
        (!key.is_empty()).then_some(key)
    }

    /// 画像生成・要点抽出用の OpenAI キー（空なら None）
    pub fn image_api_key(&self) -> Option<&str> {
        (!self.openai_key.is_empty()).then_some(self.openai_key.as_str())
    }

    /// 空の文体サンプルは既定値にフォールバック
    pub fn style_example(&self) -> &str {
        if self.style_post.trim().is_empty() {
            DEFAULT_STYLE_POST
        } else {
            &self.style_post
        }
    }

    /// 保存前の正規化: キーと役割は trim、空の文体サンプルは既定値
    pub fn normalized(mut self) -> Self {
        self.openai_key = self.openai_key.trim().to_string();
        self.anthropic_key = self.anthropic_key.trim().to_string();
        self.role_context = self.role_context.trim().to_string();
        let style = self.style_post.trim().to_string();
        self.style_post = if style.is_empty() {
            DEFAULT_STYLE_POST.to_string()
        } else {
            style
        };
        self
    }

    /// 保存済み JSON を既定値の上に重ねる。
    /// 保存値が優先され、型が合わないキーだけ既定値のまま残る。
    pub fn merge_over_defaults(saved: &serde_json::Value) -> Self {
        let defaults = Self::default();
        let Some(saved) = saved.as_object() else {
            return defaults;
        };
        let mut merged = match serde_json::to_value(&defaults) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => return defaults,
        };

        for (key, value) in saved {
            if !merged.contains_key(key) {
                continue;
            }
            let mut candidate = merged.clone();
            candidate.insert(key.clone(), value.clone());
            if serde_json::from_value::<Self>(serde_json::Value::Object(candidate.clone())).is_ok() {
                merged = candidate;
            } else {
                log::warn!("設定キー {key} の値が不正なため既定値を使用します");
            }
        }

        serde_json::from_value(serde_json::Value::Object(merged)).unwrap_or(defaults)
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            provider: Provider::OpenAi,
            openai_key: String::new(),
            anthropic_key: String::new(),
            tone: Tone::Conversational,
            length: PostLength::Medium,
            use_emoji: true,
            use_hashtags: true,
            show_prompts: false,
            style_post: DEFAULT_STYLE_POST.to_string(),
            role_context: String::new(),
        }
    }
}

// API キーはログに出さない
impl std::fmt::Debug for GenerationSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn redact(key: &str) -> &'static str {
            if key.is_empty() { "<unset>" } else { "<redacted>" }
        }
        f.debug_struct("GenerationSettings")
            .field("provider", &self.provider)
            .field("openai_key", &redact(&self.openai_key))
            .field("anthropic_key", &redact(&self.anthropic_key))
            .field("tone", &self.tone)
            .field("length", &self.length)
            .field("use_emoji", &self.use_emoji)
            .field("use_hashtags", &self.use_hashtags)
            .field("show_prompts", &self.show_prompts)
            .field("style_post_len", &self.style_post.len())
            .field("role_context", &self.role_context)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let s = GenerationSettings::default();
        assert_eq!(s.provider, Provider::OpenAi);
        assert_eq!(s.tone, Tone::Conversational);
        assert_eq!(s.length, PostLength::Medium);
        assert!(s.use_emoji);
        assert!(s.use_hashtags);
        assert!(!s.show_prompts);
        assert_eq!(s.style_post, DEFAULT_STYLE_POST);
        assert!(s.active_api_key().is_none());
    }

    #[test]
    fn test_blob_field_names() {
        let json = serde_json::to_value(GenerationSettings::default()).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "provider",
            "openaiKey",
            "anthropicKey",
            "tone",
            "length",
            "useEmoji",
            "useHashtags",
            "showPrompts",
            "stylePost",
            "roleContext",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj["length"], json!(2));
        assert_eq!(obj["provider"], json!("openai"));
    }

    #[test]
    fn test_merge_saved_values_win() {
        let saved = json!({
            "provider": "anthropic",
            "anthropicKey": "sk-ant",
            "length": 3,
            "useEmoji": false,
        });
        let s = GenerationSettings::merge_over_defaults(&saved);
        assert_eq!(s.provider, Provider::Anthropic);
        assert_eq!(s.active_api_key(), Some("sk-ant"));
        assert_eq!(s.length, PostLength::Long);
        assert!(!s.use_emoji);
        // 未保存のキーは既定値
        assert!(s.use_hashtags);
        assert_eq!(s.tone, Tone::Conversational);
    }

    #[test]
    fn test_merge_skips_malformed_keys() {
        let saved = json!({
            "provider": "mistral",
            "useHashtags": "yes",
            "roleContext": "CTO at Example",
            "unknownKey": 42,
        });
        let s = GenerationSettings::merge_over_defaults(&saved);
        assert_eq!(s.provider, Provider::OpenAi);
        assert!(s.use_hashtags);
        assert_eq!(s.role_context, "CTO at Example");
    }

    #[test]
    fn test_merge_non_object_gives_defaults() {
        let s = GenerationSettings::merge_over_defaults(&json!([1, 2, 3]));
        assert_eq!(s, GenerationSettings::default());
    }

    #[test]
    fn test_unknown_tone_and_length_fall_back() {
        let s = GenerationSettings::merge_over_defaults(&json!({
            "tone": "sarcastic",
            "length": 9,
        }));
        assert_eq!(s.tone, Tone::Conversational);
        assert_eq!(s.tone.phrase(), "conversational and engaging");
        assert_eq!(s.length, PostLength::Medium);
        assert_eq!(s.length.char_target(), "700–1000");
    }

    #[test]
    fn test_normalized() {
        let s = GenerationSettings {
            openai_key: "  sk-123 \n".to_string(),
            role_context: "  Head of Platform  ".to_string(),
            style_post: "   ".to_string(),
            ..Default::default()
        }
        .normalized();
        assert_eq!(s.openai_key, "sk-123");
        assert_eq!(s.role_context, "Head of Platform");
        assert_eq!(s.style_post, DEFAULT_STYLE_POST);
    }

    #[test]
    fn test_image_key_independent_of_provider() {
        let s = GenerationSettings {
            provider: Provider::Anthropic,
            anthropic_key: "sk-ant".to_string(),
            ..Default::default()
        };
        assert!(s.active_api_key().is_some());
        assert!(s.image_api_key().is_none());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let s = GenerationSettings {
            openai_key: "sk-secret".to_string(),
            ..Default::default()
        };
        let dbg = format!("{s:?}");
        assert!(!dbg.contains("sk-secret"));
        assert!(dbg.contains("<redacted>"));
    }
}
