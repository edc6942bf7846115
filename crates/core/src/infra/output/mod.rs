mod clipboard;
mod image_file;

pub use clipboard::ClipboardOutput;
pub use image_file::{infographic_file_name, save_png};

use crate::domain::error::AppError;

/// 出力先 trait
pub trait OutputTarget: Send + Sync {
    fn deliver(&self, text: &str) -> Result<(), AppError>;
    fn name(&self) -> &str;
}

/// 出力ルーター: 生成済み投稿をコピーする
pub struct OutputRouter {
    clipboard: Box<dyn OutputTarget>,
}

impl OutputRouter {
    pub fn new() -> Self {
        Self::with_target(Box::new(ClipboardOutput::new()))
    }

    /// 出力先を差し替える（テスト用）
    pub fn with_target(clipboard: Box<dyn OutputTarget>) -> Self {
        Self { clipboard }
    }

    pub fn copy_post(&self, text: &str) -> Result<(), AppError> {
        log::debug!("投稿を出力: target={}", self.clipboard.name());
        self.clipboard.deliver(text)
    }
}

impl Default for OutputRouter {
    fn default() -> Self {
        Self::new()
    }
}
