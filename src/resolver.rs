use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::model::{Document, FileId, Forest};
use crate::similarity::{Similarity, best_match};

/// `reference` (loadChildren のモジュール参照) に最も近いファイルを
/// `identifiers` の中から探す。
///
/// - `reference`: 例 "./feature/feature.module"
/// - `identifiers`: リンク開始時点の全ファイル識別子
///
/// 戻り値:
/// - Some(id) → 最もスコアの高いファイル
/// - None     → 候補が 1 件もない
pub fn resolve_load_children<S>(reference: &str, identifiers: &[String], scorer: &S) -> Option<FileId>
where
    S: Similarity + ?Sized,
{
    let best = best_match(scorer, reference, identifiers.iter().map(String::as_str))?;
    debug!(
        "  → {:?} を {:?} に解決 (score={:.3})",
        reference, best.target, best.rating
    );
    if best.rating == 0.0 {
        warn!(
            "loadChildren {:?} に似たファイルがありません。{:?} を使用します",
            reference, best.target
        );
    }
    Some(FileId(best.index))
}

/// ルーティングファイル同士を loadChildren の参照でつなぎ、
/// どこからも参照されないファイルだけをルートとして残す。
///
/// 1) 開始時点の識別子一覧に対して全参照を解決する (読み取りのみ)
/// 2) 解決結果を各レコードの `children` に設定し、参照先になったファイルを除いた
///    ルート一覧を作る
///
/// 同じファイルが複数箇所から参照された場合、`children` は同じ FileId を共有する。
pub fn link<S>(document: Document, scorer: &S) -> Forest
where
    S: Similarity + ?Sized,
{
    info!("ファイル同士をリンク中...");

    // 1) 参照の解決
    let identifiers = document.identifiers();
    let resolved: Vec<Vec<Option<FileId>>> = document
        .files
        .iter()
        .enumerate()
        .map(|(owner, file)| {
            file.records
                .iter()
                .map(|record| {
                    let reference = record.reference.as_deref()?;
                    let target = resolve_load_children(reference, &identifiers, scorer)?;
                    if target.0 == owner {
                        warn!(
                            "{} の loadChildren {:?} が自分自身に解決されました",
                            file.identifier, reference
                        );
                    }
                    Some(target)
                })
                .collect()
        })
        .collect();

    let absorbed: HashSet<FileId> = resolved.iter().flatten().flatten().copied().collect();

    // 2) children の設定とルートの抽出
    info!("参照済みのファイルを取り除き中...");
    let mut document = document;
    for (file, targets) in document.files.iter_mut().zip(resolved) {
        for (record, target) in file.records.iter_mut().zip(targets) {
            record.children = target;
        }
    }

    let roots: Vec<FileId> = (0..document.len())
        .map(FileId)
        .filter(|id| !absorbed.contains(id))
        .collect();

    for id in &absorbed {
        debug!("  → 子ルートとして取り込み: {}", document.file(*id).identifier);
    }
    info!(
        "ルートファイル: {} 件 (取り込み済み: {} 件)",
        roots.len(),
        absorbed.len()
    );

    Forest { document, roots }
}
