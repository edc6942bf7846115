use base64::Engine;
use serde::{Deserialize, Serialize};

use super::draft::Draft;
use super::error::AppError;
use super::theme::Theme;

/// 記事 URL の上限
pub const MAX_ARTICLE_URLS: usize = 2;

/// 投稿文字数の警告しきい値
pub const POST_CHAR_LIMIT: usize = 3000;

/// テキスト生成用プロンプト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPrompts {
    pub system: String,
    pub user: String,
}

/// 直近に組み立てたプロンプト（表示用、永続化しない）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PromptBundle {
    pub post_system: String,
    pub post_user: String,
    pub image: String,
}

/// 取得済み記事。取得失敗は text = None のまま位置を保つ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSource {
    pub url: String,
    pub text: Option<String>,
}

/// 投稿生成リクエスト（画面の入力値）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateRequest {
    pub topic: String,
    pub post_title: String,
    pub role_context: String,
    pub urls: Vec<String>,
    /// インフォグラフィックも生成するか
    pub infographic: bool,
    /// インフォグラフィック見出しの上書き
    pub infographic_title: String,
    /// 成功時に下書き保存するか
    pub save_draft: bool,
}

impl GenerateRequest {
    /// 前後空白を除き、空の URL を落とす
    pub fn normalized(mut self) -> Self {
        self.topic = self.topic.trim().to_string();
        self.post_title = self.post_title.trim().to_string();
        self.role_context = self.role_context.trim().to_string();
        self.infographic_title = self.infographic_title.trim().to_string();
        self.urls = self
            .urls
            .iter()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .collect();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// 投稿と（要求があれば）インフォグラフィック
    Full,
    /// 投稿のみ再生成
    PostOnly,
}

/// インフォグラフィック再生成に必要な入力
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfographicContext {
    pub topic: String,
    pub post_title: String,
    pub role_context: String,
    pub infographic_title: String,
}

/// 生成済み画像（PNG）
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub png: Vec<u8>,
    pub theme: Theme,
}

impl GeneratedImage {
    pub fn from_base64(b64: &str, theme: Theme) -> Result<Self, base64::DecodeError> {
        let png = base64::engine::general_purpose::STANDARD.decode(b64.trim())?;
        Ok(Self { png, theme })
    }

    pub fn data_url(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png)
        )
    }

    pub fn backdrop_hex(&self) -> &'static str {
        self.theme.backdrop_hex()
    }
}

impl std::fmt::Debug for GeneratedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedImage")
            .field("bytes", &self.png.len())
            .field("theme", &self.theme)
            .finish()
    }
}

/// 生成アクションの結果
#[derive(Debug)]
pub struct GenerationOutcome {
    pub post: String,
    pub draft: Option<Draft>,
    /// None: 要求なし / 投稿のみモード
    pub infographic: Option<Result<GeneratedImage, AppError>>,
}

/// 投稿の文字数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PostStats {
    pub chars: usize,
    pub over_limit: bool,
}

impl PostStats {
    pub fn of(text: &str) -> Self {
        let chars = text.chars().count();
        Self {
            chars,
            over_limit: chars > POST_CHAR_LIMIT,
        }
    }
}

/// エンゲージメントスコアの帯
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn of(score: u32) -> Self {
        match score {
            70.. => ScoreBand::High,
            40..=69 => ScoreBand::Medium,
            _ => ScoreBand::Low,
        }
    }

    pub fn color_hex(self) -> &'static str {
        match self {
            ScoreBand::High => "#10b981",
            ScoreBand::Medium => "#f59e0b",
            ScoreBand::Low => "#ef4444",
        }
    }
}

/// 投稿分析結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub score: Option<u32>,
    pub hook_strength: Option<String>,
    pub readability: Option<String>,
    pub working: Vec<String>,
    pub improvements: Vec<String>,
    pub revised_hook: Option<String>,
}

impl AnalysisReport {
    pub fn score_band(&self) -> Option<ScoreBand> {
        self.score.map(ScoreBand::of)
    }
}
