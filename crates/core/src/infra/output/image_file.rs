use std::path::Path;

use crate::domain::error::AppError;
use crate::domain::types::GeneratedImage;

/// ダウンロード時の既定ファイル名
pub fn infographic_file_name(timestamp_ms: i64) -> String {
    format!("linkedin-infographic-{timestamp_ms}.png")
}

/// 生成画像を PNG ファイルとして書き出す
pub fn save_png(image: &GeneratedImage, path: &Path) -> Result<(), AppError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| AppError::output(format!("保存先ディレクトリ作成失敗: {e}")))?;
    }
    std::fs::write(path, &image.png)
        .map_err(|e| AppError::output(format!("画像保存失敗: {e}")))?;
    log::info!("インフォグラフィックを保存: {} ({} bytes)", path.display(), image.png.len());
    Ok(())
}
