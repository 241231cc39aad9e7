use tracing::{info, warn};

use crate::model::{FileId, Forest};

/// リンク済みのルートツリーを深さ優先でたどり、`root_path` からの絶対パス一覧にする。
///
/// ルートファイルは Document の順、レコードは抽出順に出力する (この時点ではソートしない)。
/// 展開中のファイルへ戻る参照 (自己参照・相互参照) はパスだけ出力して展開しない。
pub fn flatten(root_path: &str, forest: &Forest) -> Vec<String> {
    info!("ルートをパスに変換中...");

    let mut paths = Vec::new();
    let mut chain = Vec::new();
    for (id, _) in forest.root_files() {
        flatten_file(forest, id, root_path, &mut chain, &mut paths);
    }
    paths
}

fn flatten_file(
    forest: &Forest,
    id: FileId,
    root_path: &str,
    chain: &mut Vec<FileId>,
    paths: &mut Vec<String>,
) {
    chain.push(id);

    for record in &forest.file(id).records {
        let child_path = format!("{}/{}", root_path, record.path);
        paths.push(child_path.clone());

        let Some(target) = record.children else {
            continue;
        };
        if chain.contains(&target) {
            warn!(
                "循環参照を検出しました: {} → {} ({})",
                forest.file(id).identifier,
                forest.file(target).identifier,
                child_path
            );
            continue;
        }
        flatten_file(forest, target, &child_path, chain, paths);
    }

    chain.pop();
}
