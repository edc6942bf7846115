//! LinkedIn 投稿・インフォグラフィック生成のコアロジック
//!
//! - `domain`: 設定、テーマ、下書きなどの型と状態
//! - `infra`: プロンプト組み立て、生成 API クライアント、記事取得、ストレージ、出力
//! - `usecase`: アプリケーション状態を所有するオーケストレータ

pub mod domain;
pub mod infra;
pub mod usecase;
