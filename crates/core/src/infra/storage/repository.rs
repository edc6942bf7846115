use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::draft::{self, Draft};
use crate::domain::error::AppError;
use crate::domain::settings::GenerationSettings;

/// 設定 blob のキー
pub const SETTINGS_KEY: &str = "li_settings";
/// 下書き blob のキー
pub const DRAFTS_KEY: &str = "li_drafts";

/// SQLite 上のキーバリューストア（設定と下書きの2キー）
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// 新規接続（ファイルパス指定）
    pub fn open(path: &std::path::Path) -> Result<Self, AppError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| AppError::storage(format!("DBディレクトリ作成に失敗: {e}")))?;
        }
        let conn = Connection::open(path)
            .map_err(|e| AppError::storage(format!("DB接続に失敗: {e}")))?;
        let storage = Self { conn };
        storage.migrate()?;
        Ok(storage)
    }

    /// in-memory DB（テスト用）
    pub fn open_in_memory() -> Result<Self, AppError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::storage(format!("in-memory DB作成に失敗: {e}")))?;
        let storage = Self { conn };
        storage.migrate()?;
        Ok(storage)
    }

    fn migrate(&self) -> Result<(), AppError> {
        self.conn
            .execute_batch(
                "
                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );
                ",
            )
            .map_err(|e| AppError::storage(format!("マイグレーション失敗: {e}")))?;
        Ok(())
    }

    // --- Raw blobs ---

    pub fn get_blob(&self, key: &str) -> Result<Option<String>, AppError> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| AppError::storage(format!("読み取り失敗 ({key}): {e}")))
    }

    pub fn put_blob(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(|e| AppError::storage(format!("書き込み失敗 ({key}): {e}")))?;
        Ok(())
    }

    // --- Settings ---

    /// 保存済み設定を既定値の上にマージして返す
    pub fn get_settings(&self) -> Result<GenerationSettings, AppError> {
        let Some(raw) = self.get_blob(SETTINGS_KEY)? else {
            return Ok(GenerationSettings::default());
        };

        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(saved) => Ok(GenerationSettings::merge_over_defaults(&saved)),
            Err(e) => {
                log::warn!("設定 blob が壊れているため既定値を使用します: {e}");
                Ok(GenerationSettings::default())
            }
        }
    }

    /// 設定を丸ごと保存する
    pub fn save_settings(&self, settings: &GenerationSettings) -> Result<(), AppError> {
        let json = serde_json::to_string(settings)
            .map_err(|e| AppError::internal(format!("settings serialize: {e}")))?;
        self.put_blob(SETTINGS_KEY, &json)
    }

    // --- Drafts ---

    /// 下書き一覧（新しい順）
    pub fn list_drafts(&self) -> Result<Vec<Draft>, AppError> {
        let Some(raw) = self.get_blob(DRAFTS_KEY)? else {
            return Ok(vec![]);
        };

        match serde_json::from_str::<Vec<Draft>>(&raw) {
            Ok(drafts) => Ok(drafts),
            Err(e) => {
                log::warn!("下書き blob が壊れているため空として扱います: {e}");
                Ok(vec![])
            }
        }
    }

    pub fn save_drafts(&self, drafts: &[Draft]) -> Result<(), AppError> {
        let json = serde_json::to_string(drafts)
            .map_err(|e| AppError::internal(format!("drafts serialize: {e}")))?;
        self.put_blob(DRAFTS_KEY, &json)
    }

    /// 読み込み→先頭追加→上限で切り詰め→保存 を一度に行う
    pub fn push_draft(&self, new_draft: Draft) -> Result<Vec<Draft>, AppError> {
        let mut drafts = self.list_drafts()?;
        draft::push_capped(&mut drafts, new_draft);
        self.save_drafts(&drafts)?;
        Ok(drafts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::MAX_DRAFTS;
    use crate::domain::settings::{PostLength, Provider};

    fn draft(id: i64) -> Draft {
        Draft {
            id,
            topic: format!("topic {id}"),
            text: format!("text {id}"),
            date: "1/15/2025".to_string(),
        }
    }

    #[test]
    fn test_settings_default_when_empty() {
        let storage = Storage::open_in_memory().unwrap();
        let settings = storage.get_settings().unwrap();
        assert_eq!(settings, GenerationSettings::default());
    }

    #[test]
    fn test_save_and_get_settings() {
        let storage = Storage::open_in_memory().unwrap();
        let settings = GenerationSettings {
            provider: Provider::Anthropic,
            anthropic_key: "sk-ant".to_string(),
            length: PostLength::Long,
            show_prompts: true,
            ..Default::default()
        };
        storage.save_settings(&settings).unwrap();

        let loaded = storage.get_settings().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_blob_merged_over_defaults() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .put_blob(SETTINGS_KEY, r#"{"useHashtags":false}"#)
            .unwrap();
        let loaded = storage.get_settings().unwrap();
        assert!(!loaded.use_hashtags);
        assert!(loaded.use_emoji);
    }

    #[test]
    fn test_corrupt_settings_blob_gives_defaults() {
        let storage = Storage::open_in_memory().unwrap();
        storage.put_blob(SETTINGS_KEY, "{not json").unwrap();
        assert_eq!(storage.get_settings().unwrap(), GenerationSettings::default());
    }

    #[test]
    fn test_drafts_empty_and_corrupt() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(storage.list_drafts().unwrap().is_empty());
        storage.put_blob(DRAFTS_KEY, "[{\"id\":\"x\"}]").unwrap();
        assert!(storage.list_drafts().unwrap().is_empty());
    }

    #[test]
    fn test_push_draft_caps_and_persists() {
        let storage = Storage::open_in_memory().unwrap();
        for id in 0..(MAX_DRAFTS as i64 + 3) {
            storage.push_draft(draft(id)).unwrap();
        }
        let drafts = storage.list_drafts().unwrap();
        assert_eq!(drafts.len(), MAX_DRAFTS);
        assert_eq!(drafts[0].id, MAX_DRAFTS as i64 + 2);
        assert_eq!(drafts.last().unwrap().id, 3);
    }

    #[test]
    fn test_keys_are_independent() {
        let storage = Storage::open_in_memory().unwrap();
        storage.push_draft(draft(1)).unwrap();
        storage
            .save_settings(&GenerationSettings::default())
            .unwrap();
        assert_eq!(storage.list_drafts().unwrap().len(), 1);
        assert!(storage.get_blob(SETTINGS_KEY).unwrap().is_some());
        assert!(storage.get_blob("missing").unwrap().is_none());
    }

    #[test]
    fn test_file_backed_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("lp.db");
        {
            let storage = Storage::open(&path).unwrap();
            storage.push_draft(draft(7)).unwrap();
        }
        let storage = Storage::open(&path).unwrap();
        assert_eq!(storage.list_drafts().unwrap()[0].id, 7);
    }
}
