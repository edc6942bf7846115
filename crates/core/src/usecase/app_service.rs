use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::domain::draft::Draft;
use crate::domain::error::AppError;
use crate::domain::settings::{GenerationSettings, Provider};
use crate::domain::theme::Theme;
use crate::domain::theme_selector::ThemeSelector;
use crate::domain::types::{
    AnalysisReport, GenerateRequest, GeneratedImage, GenerationMode, GenerationOutcome,
    InfographicContext, PostStats, PromptBundle, TextPrompts, MAX_ARTICLE_URLS,
};
use crate::infra::article::{self, ArticleFetcher, ProxyArticleFetcher};
use crate::infra::config::RuntimeConfig;
use crate::infra::generator::{GenerateError, GeneratorFactory, HttpGeneratorFactory};
use crate::infra::output::{self, OutputRouter};
use crate::infra::prompts::analysis::{parse_analysis, render_analysis_prompts};
use crate::infra::prompts::takeaways::{
    choose_headline, parse_takeaways, role_short_label, takeaways_user_prompt, TAKEAWAYS_SYSTEM,
};
use crate::infra::prompts::{render_image_prompt, render_text_prompts, ImagePromptInput};
use crate::infra::storage::Storage;

const MSG_EMPTY_INPUT: &str = "Please enter a topic or at least one article URL";
const MSG_NO_API_KEY: &str = "Please add your API key in the Settings tab";
const MSG_NO_IMAGE_KEY: &str =
    "An OpenAI API key is required to generate infographics (gpt-image-1)";

/// 画面に対応するアプリケーション状態
struct StudioState {
    settings: GenerationSettings,
    generated_post: String,
    generated_image: Option<GeneratedImage>,
    last_prompts: PromptBundle,
    theme: ThemeSelector,
    infographic_ctx: InfographicContext,
}

/// アプリケーションサービス
///
/// 状態は tokio の Mutex 一つに集約し、生成中はロックを保持する。
/// これによりユーザー操作は一度に一つずつ処理される。
pub struct AppService {
    state: tokio::sync::Mutex<StudioState>,
    storage: Mutex<Storage>,
    generators: Box<dyn GeneratorFactory>,
    articles: Box<dyn ArticleFetcher>,
    output_router: OutputRouter,
}

impl AppService {
    pub fn new(
        storage: Storage,
        generators: Box<dyn GeneratorFactory>,
        articles: Box<dyn ArticleFetcher>,
        output_router: OutputRouter,
    ) -> Result<Self, AppError> {
        let settings = storage.get_settings()?;
        log::info!(
            "AppService 初期化: provider={}, tone={}, length={}",
            settings.provider.display_name(),
            settings.tone.as_str(),
            settings.length.label()
        );

        Ok(Self {
            state: tokio::sync::Mutex::new(StudioState {
                settings,
                generated_post: String::new(),
                generated_image: None,
                last_prompts: PromptBundle::default(),
                theme: ThemeSelector::default(),
                infographic_ctx: InfographicContext::default(),
            }),
            storage: Mutex::new(storage),
            generators,
            articles,
            output_router,
        })
    }

    /// 実運用の構成（SQLite ファイル + HTTP クライアント + クリップボード）で起動する
    pub fn open(config: &RuntimeConfig) -> Result<Self, AppError> {
        log::info!("DB: {}", config.db_path.display());
        let storage = Storage::open(&config.db_path)?;
        Self::new(
            storage,
            Box::new(HttpGeneratorFactory::new(config.endpoints.clone())),
            Box::new(ProxyArticleFetcher::new(&config.endpoints)),
            OutputRouter::new(),
        )
    }

    fn storage(&self) -> Result<MutexGuard<'_, Storage>, AppError> {
        self.storage
            .lock()
            .map_err(|_| AppError::internal("storage lock poisoned"))
    }

    // ==================== Settings ====================

    pub async fn settings(&self) -> GenerationSettings {
        self.state.lock().await.settings.clone()
    }

    /// 設定を正規化して保存する。保存に失敗したら現在の設定は変えない。
    pub async fn save_settings(&self, settings: GenerationSettings) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        self.commit_settings(&mut state, settings)
    }

    /// 生成画面の役割欄の変更を設定へ反映する
    pub async fn update_role_context(&self, role_context: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        let mut settings = state.settings.clone();
        settings.role_context = role_context.trim().to_string();
        self.commit_settings(&mut state, settings)
    }

    /// 読み込みから保存までを同じロック内で行うこと
    fn commit_settings(
        &self,
        state: &mut StudioState,
        settings: GenerationSettings,
    ) -> Result<(), AppError> {
        let settings = settings.normalized();
        self.storage()?.save_settings(&settings)?;
        log::info!(
            "設定を保存: provider={}, tone={}, length={}",
            settings.provider.display_name(),
            settings.tone.as_str(),
            settings.length.label()
        );
        state.settings = settings;
        Ok(())
    }

    // ==================== Generation ====================

    /// 投稿を生成し、要求があればインフォグラフィックも続けて生成する。
    ///
    /// インフォグラフィックの失敗は投稿の成功を取り消さず、
    /// `GenerationOutcome::infographic` に入れて返す。
    pub async fn generate_post(
        &self,
        request: GenerateRequest,
        mode: GenerationMode,
    ) -> Result<GenerationOutcome, AppError> {
        let request = request.normalized();

        if request.topic.is_empty() && request.urls.is_empty() {
            return Err(AppError::validation(MSG_EMPTY_INPUT));
        }
        if request.urls.len() > MAX_ARTICLE_URLS {
            return Err(AppError::validation(format!(
                "Maximum {MAX_ARTICLE_URLS} article URLs allowed"
            )));
        }

        let mut state = self.state.lock().await;
        let provider = state.settings.provider;
        let api_key = state
            .settings
            .active_api_key()
            .ok_or_else(|| AppError::missing_credential(MSG_NO_API_KEY))?
            .to_string();

        let role_context = if request.role_context.is_empty() {
            state.settings.role_context.clone()
        } else {
            request.role_context.clone()
        };

        log::info!(
            "投稿生成開始: provider={}, urls={}, infographic={}, mode={mode:?}",
            provider.display_name(),
            request.urls.len(),
            request.infographic
        );

        let articles = if request.urls.is_empty() {
            Vec::new()
        } else {
            article::fetch_all(self.articles.as_ref(), &request.urls).await
        };

        let prompts = render_text_prompts(
            &state.settings,
            &request.topic,
            &request.post_title,
            &role_context,
            &articles,
        );
        state.last_prompts.post_system = prompts.system.clone();
        state.last_prompts.post_user = prompts.user.clone();

        let generator = self.generators.text_generator(provider, &api_key);
        let post = generator.generate(&prompts).await?;
        log::info!(
            "投稿生成完了: {} 文字 ({})",
            post.chars().count(),
            generator.name()
        );

        let draft = if request.save_draft {
            let draft = Draft::new(&request.topic, &post, chrono::Local::now());
            self.storage()?.push_draft(draft.clone())?;
            log::info!("下書きを保存: id={}", draft.id);
            Some(draft)
        } else {
            None
        };

        state.generated_post = post.clone();
        state.infographic_ctx = InfographicContext {
            topic: request.topic.clone(),
            post_title: request.post_title.clone(),
            role_context,
            infographic_title: request.infographic_title.clone(),
        };

        let infographic = if mode == GenerationMode::Full && request.infographic {
            let theme = state.theme.current();
            let result = self.render_infographic(&mut state, theme).await;
            if let Err(e) = &result {
                log::warn!("インフォグラフィック生成失敗: {e}");
            }
            Some(result)
        } else {
            None
        };

        Ok(GenerationOutcome {
            post,
            draft,
            infographic,
        })
    }

    /// 現在の投稿と選択中テーマでインフォグラフィックを生成する
    pub async fn generate_infographic(&self) -> Result<GeneratedImage, AppError> {
        let mut state = self.state.lock().await;
        let theme = state.theme.current();
        self.render_infographic(&mut state, theme).await
    }

    /// 投稿が無ければ何もしない
    pub async fn regenerate_infographic(&self) -> Result<Option<GeneratedImage>, AppError> {
        let mut state = self.state.lock().await;
        if state.generated_post.is_empty() {
            log::debug!("投稿が無いため再生成をスキップ");
            return Ok(None);
        }
        let theme = state.theme.current();
        self.render_infographic(&mut state, theme).await.map(Some)
    }

    async fn render_infographic(
        &self,
        state: &mut StudioState,
        theme: Theme,
    ) -> Result<GeneratedImage, AppError> {
        if state.generated_post.is_empty() {
            return Err(AppError::invalid_state("Generate a post first"));
        }
        let openai_key = state
            .settings
            .image_api_key()
            .ok_or_else(|| AppError::missing_credential(MSG_NO_IMAGE_KEY))?
            .to_string();

        log::info!("インフォグラフィック生成開始: theme={theme}");

        let extractor = self.generators.text_generator(Provider::OpenAi, &openai_key);
        let raw = extractor
            .generate(&TextPrompts {
                system: TAKEAWAYS_SYSTEM.to_string(),
                user: takeaways_user_prompt(&state.generated_post),
            })
            .await
            .map_err(infographic_error)?;
        let takeaways = parse_takeaways(&raw);

        let ctx = &state.infographic_ctx;
        let headline = choose_headline(
            &ctx.infographic_title,
            &ctx.post_title,
            &ctx.topic,
            &takeaways,
        )
        .to_string();
        let role_short = role_short_label(&ctx.role_context);
        let takeaway = |i: usize| takeaways.get(i).map(String::as_str).unwrap_or("");

        let prompt = render_image_prompt(
            theme,
            &ImagePromptInput {
                headline: &headline,
                takeaways: [takeaway(0), takeaway(1), takeaway(2)],
                role_short: &role_short,
            },
        );
        state.last_prompts.image = prompt.clone();

        let b64 = self
            .generators
            .image_generator(&openai_key)
            .generate_image(&prompt)
            .await
            .map_err(infographic_error)?;
        let image = GeneratedImage::from_base64(&b64, theme).map_err(|e| {
            AppError::provider(format!("Infographic: image data could not be decoded: {e}"))
        })?;

        log::info!(
            "インフォグラフィック生成完了: theme={theme}, {} bytes",
            image.png.len()
        );
        state.generated_image = Some(image.clone());
        Ok(image)
    }

    // ==================== Themes ====================

    pub async fn current_theme(&self) -> Theme {
        self.state.lock().await.theme.current()
    }

    pub async fn highlighted_theme(&self) -> Option<Theme> {
        self.state.lock().await.theme.highlighted()
    }

    /// テーマを選ぶ。生成済み投稿があれば新テーマで一度だけ再生成する。
    pub async fn select_theme(&self, theme: Theme) -> Result<Option<GeneratedImage>, AppError> {
        let mut state = self.state.lock().await;
        let has_content = !state.generated_post.is_empty();
        let target = state
            .theme
            .select_and_maybe_regenerate(theme, has_content, |t| t);
        log::info!("テーマ選択: {theme} (再生成={})", target.is_some());

        match target {
            Some(t) => self.render_infographic(&mut state, t).await.map(Some),
            None => Ok(None),
        }
    }

    /// サイクル上の次のテーマへ進む
    pub async fn cycle_theme(&self) -> Result<(Theme, Option<GeneratedImage>), AppError> {
        let mut state = self.state.lock().await;
        let has_content = !state.generated_post.is_empty();
        let target = state.theme.cycle_forward(has_content, |t| t);
        let theme = state.theme.current();
        log::info!("テーマ切替: {theme} (再生成={})", target.is_some());

        let image = match target {
            Some(t) => Some(self.render_infographic(&mut state, t).await?),
            None => None,
        };
        Ok((theme, image))
    }

    // ==================== Analysis ====================

    pub async fn analyze_post(&self, post: &str) -> Result<AnalysisReport, AppError> {
        let post = post.trim();
        if post.is_empty() {
            return Err(AppError::validation("Please paste a post to analyze"));
        }

        let state = self.state.lock().await;
        let provider = state.settings.provider;
        let api_key = state
            .settings
            .active_api_key()
            .ok_or_else(|| AppError::missing_credential(MSG_NO_API_KEY))?
            .to_string();

        log::info!("投稿分析開始: {} 文字", post.chars().count());
        let raw = self
            .generators
            .text_generator(provider, &api_key)
            .generate(&render_analysis_prompts(post))
            .await?;
        let report = parse_analysis(&raw);
        log::info!("投稿分析完了: score={:?}", report.score);
        Ok(report)
    }

    // ==================== Drafts ====================

    /// 毎回ストレージから読み直す
    pub fn drafts(&self) -> Result<Vec<Draft>, AppError> {
        self.storage()?.list_drafts()
    }

    /// 下書きを現在の投稿として読み込む
    pub async fn load_draft(&self, id: i64) -> Result<Draft, AppError> {
        let draft = self
            .drafts()?
            .into_iter()
            .find(|d| d.id == id)
            .ok_or_else(|| AppError::invalid_state(format!("Draft {id} not found")))?;

        let mut state = self.state.lock().await;
        let role_context = state.settings.role_context.clone();
        state.generated_post = draft.text.clone();
        state.infographic_ctx = InfographicContext {
            topic: draft.topic.clone(),
            role_context,
            ..Default::default()
        };
        log::info!("下書きを読み込み: id={id}");
        Ok(draft)
    }

    // ==================== Output ====================

    pub async fn copy_post(&self) -> Result<(), AppError> {
        let state = self.state.lock().await;
        if state.generated_post.is_empty() {
            return Err(AppError::invalid_state("Nothing to copy yet"));
        }
        self.output_router.copy_post(&state.generated_post)
    }

    /// 生成画像を `dir` に既定のファイル名で保存し、保存先を返す
    pub async fn save_infographic(&self, dir: &Path) -> Result<PathBuf, AppError> {
        let state = self.state.lock().await;
        let image = state
            .generated_image
            .as_ref()
            .ok_or_else(|| AppError::invalid_state("No infographic has been generated"))?;
        let path = dir.join(output::infographic_file_name(
            chrono::Utc::now().timestamp_millis(),
        ));
        output::save_png(image, &path)?;
        Ok(path)
    }

    // ==================== State Accessors ====================

    pub async fn generated_post(&self) -> String {
        self.state.lock().await.generated_post.clone()
    }

    pub async fn generated_image(&self) -> Option<GeneratedImage> {
        self.state.lock().await.generated_image.clone()
    }

    pub async fn post_stats(&self) -> PostStats {
        PostStats::of(&self.state.lock().await.generated_post)
    }

    /// プロンプト表示が有効なときだけ直近のプロンプトを返す
    pub async fn prompts_for_display(&self) -> Option<PromptBundle> {
        let state = self.state.lock().await;
        state
            .settings
            .show_prompts
            .then(|| state.last_prompts.clone())
    }
}

/// インフォグラフィック生成中の API エラーには接頭辞を付ける
fn infographic_error(e: GenerateError) -> AppError {
    let mut err = AppError::from(e);
    err.message = format!("Infographic: {}", err.message);
    err
}
