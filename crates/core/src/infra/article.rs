use std::sync::LazyLock;

use async_trait::async_trait;
use futures_util::future::join_all;
use regex::Regex;
use serde::Deserialize;

use crate::domain::types::ArticleSource;
use crate::infra::config::EndpointConfig;

/// 記事本文の最大文字数
pub const MAX_ARTICLE_CHARS: usize = 3000;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script.*?</script>").expect("valid script regex"));
static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style.*?</style>").expect("valid style regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// 記事取得 trait。失敗は全て None（呼び出し元にエラーを上げない）
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Option<String>;
}

/// 全 URL を並行に取得し、入力順のまま結果を返す。
/// 一件の失敗は他をキャンセルしない。
pub async fn fetch_all(fetcher: &dyn ArticleFetcher, urls: &[String]) -> Vec<ArticleSource> {
    let texts = join_all(urls.iter().map(|url| fetcher.fetch_text(url))).await;
    urls.iter()
        .zip(texts)
        .map(|(url, text)| {
            if text.is_none() {
                log::warn!("記事を取得できませんでした: {url}");
            }
            ArticleSource {
                url: url.clone(),
                text,
            }
        })
        .collect()
}

/// HTML からタグを除去し、空白を圧縮して先頭 3000 文字に切る
pub fn extract_text(html: &str) -> Option<String> {
    let text = SCRIPT_BLOCK.replace_all(html, "");
    let text = STYLE_BLOCK.replace_all(&text, "");
    let text = TAG.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    let text: String = text.trim().chars().take(MAX_ARTICLE_CHARS).collect();
    (!text.is_empty()).then_some(text)
}

#[derive(Deserialize)]
struct ProxyResponse {
    #[serde(default)]
    contents: Option<String>,
}

/// CORS プロキシ経由で記事 HTML を取得する
pub struct ProxyArticleFetcher {
    client: reqwest::Client,
    proxy_url: String,
}

impl ProxyArticleFetcher {
    pub fn new(endpoints: &EndpointConfig) -> Self {
        Self {
            client: crate::infra::generator::http_client(endpoints.article_timeout),
            proxy_url: endpoints.article_proxy_url.clone(),
        }
    }

    async fn fetch_html(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self
            .client
            .get(format!("{}/get", self.proxy_url))
            .query(&[("url", url)])
            .send()
            .await?
            .error_for_status()?;
        let body: ProxyResponse = response.json().await?;
        Ok(body.contents.unwrap_or_default())
    }
}

#[async_trait]
impl ArticleFetcher for ProxyArticleFetcher {
    async fn fetch_text(&self, url: &str) -> Option<String> {
        match self.fetch_html(url).await {
            Ok(html) => extract_text(&html),
            Err(e) => {
                log::debug!("記事取得失敗 {url}: {e}");
                None
            }
        }
    }
}
