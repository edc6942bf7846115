use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// 保存できる下書きの上限
pub const MAX_DRAFTS: usize = 10;

const PREVIEW_CHARS: usize = 100;

/// 下書き（生成済み投稿の保存コピー）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    /// 作成時刻（UNIX ミリ秒）
    pub id: i64,
    pub topic: String,
    pub text: String,
    /// 表示用日付（M/D/YYYY）
    pub date: String,
}

impl Draft {
    pub fn new<Tz: TimeZone>(topic: &str, text: &str, now: DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let topic = if topic.trim().is_empty() {
            "Untitled"
        } else {
            topic.trim()
        };
        Self {
            id: now.timestamp_millis(),
            topic: topic.to_string(),
            text: text.to_string(),
            date: now.format("%-m/%-d/%Y").to_string(),
        }
    }

    /// 一覧表示用の先頭抜粋
    pub fn preview(&self) -> String {
        let head: String = self.text.chars().take(PREVIEW_CHARS).collect();
        format!("{head}…")
    }
}

/// 新しい順に先頭へ追加し、上限を超えた最古のものを捨てる
pub fn push_capped(drafts: &mut Vec<Draft>, draft: Draft) {
    drafts.insert(0, draft);
    drafts.truncate(MAX_DRAFTS);
}
