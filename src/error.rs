//! サイトマップ生成で発生するエラー型。

use std::path::PathBuf;

use thiserror::Error;

/// サイトマップ生成処理全体のエラー型
#[derive(Debug, Error)]
pub enum SitemapError {
    /// 解析対象のソースディレクトリが存在しない (抽出前に中断)
    #[error("ソースパスが存在しません: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// `output` オプションが txt / xml 以外
    #[error("サポートされていない出力形式です: {0} (txt または xml を指定してください)")]
    UnsupportedOutputFormat(String),

    /// ファイル読み書きの失敗
    #[error("I/O エラー: {0}")]
    Io(#[from] std::io::Error),

    /// ディレクトリ探索の失敗
    #[error("ディレクトリ探索エラー: {0}")]
    Walk(#[from] walkdir::Error),

    /// `src` の glob パターンが不正
    #[error("glob パターンが不正です: {0}")]
    Glob(#[from] globset::Error),

    /// 設定ファイル (JSON) が読めない
    #[error("設定ファイルの形式が不正です: {0}")]
    Config(#[from] serde_json::Error),

    /// sitemap.xml の書き出し失敗
    #[error("XML 出力エラー: {0}")]
    Xml(String),
}

pub type Result<T> = std::result::Result<T, SitemapError>;
