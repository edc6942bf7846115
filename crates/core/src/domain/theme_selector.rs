use super::theme::{self, Theme};

/// テーマ選択状態
///
/// 「現在のテーマ」は単一選択コントロールの値としてここで保持し、
/// ハイライト表示はそれとは独立したインジケータとして同期する。
/// UI 側はこの構造体の値を映すだけ。
#[derive(Debug, Clone)]
pub struct ThemeSelector {
    selected: Theme,
    highlighted: Option<Theme>,
}

impl ThemeSelector {
    pub fn new(initial: Theme) -> Self {
        let mut selector = Self {
            selected: initial,
            highlighted: None,
        };
        selector.set_active(initial.as_str());
        selector
    }

    /// 単一選択コントロールの現在値
    pub fn current(&self) -> Theme {
        self.selected
    }

    /// ハイライト中のテーマ
    pub fn highlighted(&self) -> Option<Theme> {
        self.highlighted
    }

    /// ハイライトを全て外し、既知のテーマならそれだけを点灯する。
    /// 未知の値ならどれも点灯しない。
    pub fn set_active(&mut self, candidate: &str) {
        self.highlighted = None;
        if let Some(theme) = Theme::parse(candidate) {
            self.highlighted = Some(theme);
        }
    }

    /// テーマを選択してハイライトを同期し、生成済みコンテンツがあるときだけ
    /// `regenerate` を一度呼ぶ。選択とハイライトは呼び出し前に反映済み。
    pub fn select_and_maybe_regenerate<R>(
        &mut self,
        theme: Theme,
        has_generated_content: bool,
        regenerate: impl FnOnce(Theme) -> R,
    ) -> Option<R> {
        self.selected = theme;
        self.set_active(theme.as_str());
        has_generated_content.then(|| regenerate(self.selected))
    }

    /// サイクル上の次のテーマへ進む
    pub fn cycle_forward<R>(
        &mut self,
        has_generated_content: bool,
        regenerate: impl FnOnce(Theme) -> R,
    ) -> Option<R> {
        let next = theme::advance(self.selected.as_str());
        self.select_and_maybe_regenerate(next, has_generated_content, regenerate)
    }
}

impl Default for ThemeSelector {
    fn default() -> Self {
        Self::new(Theme::DEFAULT)
    }
}
