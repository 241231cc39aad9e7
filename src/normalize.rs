use std::collections::HashSet;

use tracing::{debug, info};

/// パス整理のオプション
#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    /// そのまま追加するパス
    pub manual: Vec<String>,
    /// 出力から除外するパス (先頭の "/" は省略可)
    pub ignore: Vec<String>,
}

/// 1 件のパスを整える。パラメータ (`:id` 以降)・末尾の "/" 1 つ・
/// ワイルドカード `/**` を取り除き、空になったら "/" にする。
/// 空セグメントから生じる "//" はそのまま残す
pub fn clean_path(path: &str) -> String {
    // 1) 最初の ':' 以降を捨てる
    let path = match path.find(':') {
        Some(idx) => &path[..idx],
        None => path,
    };

    // 2) 末尾の "/" を 1 つ取り除く
    let path = path.strip_suffix('/').unwrap_or(path);

    // 3) ワイルドカードを取り除く
    let cleaned = path.replace("/**", "");

    if cleaned.is_empty() {
        "/".to_string()
    } else {
        cleaned
    }
}

/// 除外リストの各要素を "/" 始まりにそろえる
fn ignore_set(ignore: &[String]) -> HashSet<String> {
    ignore
        .iter()
        .map(|p| {
            if p.starts_with('/') {
                p.clone()
            } else {
                format!("/{p}")
            }
        })
        .collect()
}

/// Flattener が出力したパス一覧を整理し、ソート・重複除去・除外を行う
pub fn normalize(paths: Vec<String>, options: &NormalizeOptions) -> Vec<String> {
    info!("パスを整理中...");

    let mut paths: Vec<String> = paths
        .iter()
        .chain(options.manual.iter())
        .map(|p| clean_path(p))
        .collect();

    paths.sort();
    paths.dedup();

    let ignore = ignore_set(&options.ignore);
    paths.retain(|p| {
        let keep = !ignore.contains(p);
        if !keep {
            debug!("  → 除外: {}", p);
        }
        keep
    });

    info!("パス: {} 件", paths.len());
    paths
}
