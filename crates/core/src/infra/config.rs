use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "LP_DB_PATH";
pub const ENV_OPENAI_BASE_URL: &str = "LP_OPENAI_BASE_URL";
pub const ENV_ANTHROPIC_BASE_URL: &str = "LP_ANTHROPIC_BASE_URL";
pub const ENV_ARTICLE_PROXY_URL: &str = "LP_ARTICLE_PROXY_URL";

/// 外部エンドポイント設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub openai_base_url: String,
    pub anthropic_base_url: String,
    /// 記事取得プロキシ（`{base}/get?url=...` が `{ contents }` を返す）
    pub article_proxy_url: String,
    pub generation_timeout: Duration,
    /// 記事取得の目安タイムアウト
    pub article_timeout: Duration,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            openai_base_url: "https://api.openai.com".to_string(),
            anthropic_base_url: "https://api.anthropic.com".to_string(),
            article_proxy_url: "https://api.allorigins.win".to_string(),
            generation_timeout: Duration::from_secs(120),
            article_timeout: Duration::from_secs(10),
        }
    }
}

/// 実行時設定（環境変数 + 既定値）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub db_path: PathBuf,
    pub endpoints: EndpointConfig,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のルックアップ関数から読む（テスト用に分離）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = EndpointConfig::default();

        let db_path = get(ENV_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let endpoints = EndpointConfig {
            openai_base_url: get(ENV_OPENAI_BASE_URL)
                .map(trim_slash)
                .unwrap_or(defaults.openai_base_url),
            anthropic_base_url: get(ENV_ANTHROPIC_BASE_URL)
                .map(trim_slash)
                .unwrap_or(defaults.anthropic_base_url),
            article_proxy_url: get(ENV_ARTICLE_PROXY_URL)
                .map(trim_slash)
                .unwrap_or(defaults.article_proxy_url),
            ..defaults
        };

        Self { db_path, endpoints }
    }
}

/// DB はアプリデータディレクトリに置く
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("linkpost")
        .join("linkpost.db")
}

fn trim_slash(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_env_empty() {
        let cfg = RuntimeConfig::from_lookup(|_| None);
        assert_eq!(cfg.endpoints, EndpointConfig::default());
        assert!(cfg.db_path.ends_with("linkpost/linkpost.db"));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_DB_PATH, "/tmp/lp.db"),
            (ENV_OPENAI_BASE_URL, "http://localhost:8080/"),
            (ENV_ARTICLE_PROXY_URL, "  "),
        ]);
        let cfg = RuntimeConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/lp.db"));
        assert_eq!(cfg.endpoints.openai_base_url, "http://localhost:8080");
        assert_eq!(cfg.endpoints.article_proxy_url, "https://api.allorigins.win");
        assert_eq!(cfg.endpoints.article_timeout, Duration::from_secs(10));
    }
}
