use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use path_absolutize::Absolutize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Result, SitemapError};

/// 読み込んだルーティングファイル 1 件
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// ソースディレクトリからの相対パス ("/" 区切り)
    pub identifier: String,
    pub contents: String,
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// `path` を `root` からの相対パスにし、"/" 区切りの文字列にする
fn identifier_for(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// `source_dir` 以下を再帰的に探索し、`patterns` のいずれかにマッチするファイルを読み込む。
///
/// - ソースディレクトリが存在しなければ `SourceNotFound`
/// - ファイルの読み込みに失敗したらそのままエラーを返す (途中までの結果は返さない)
/// - UTF-8 として不正なバイトは置換文字にして読み込む
///
/// ファイル名順に探索するので、同じ入力なら常に同じ順序になる。
pub fn collect_route_sources(source_dir: &Path, patterns: &[String]) -> Result<Vec<SourceFile>> {
    // 1) ソースディレクトリを絶対パス化して存在確認
    let root: PathBuf = source_dir.absolutize()?.to_path_buf();
    if !root.is_dir() {
        return Err(SitemapError::SourceNotFound(root));
    }
    info!("ソースディレクトリ: {}", root.display());

    // 2) glob パターンを準備
    let globs = build_globset(patterns)?;

    // 3) 探索してマッチしたファイルを読み込む
    let mut sources = Vec::new();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let identifier = identifier_for(entry.path(), &root);
        if !globs.is_match(&identifier) {
            continue;
        }
        debug!("  → 読み込み: {}", identifier);
        let contents = String::from_utf8_lossy(&fs::read(entry.path())?).into_owned();
        sources.push(SourceFile {
            identifier,
            contents,
        });
    }

    info!("対象ファイル: {} 件", sources.len());
    Ok(sources)
}
