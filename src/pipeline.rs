use std::path::PathBuf;

use tracing::{debug, error, warn};

use crate::config::SitemapOptions;
use crate::error::{Result, SitemapError};
use crate::flatten::flatten;
use crate::model::Forest;
use crate::normalize::normalize;
use crate::parser::build_document;
use crate::resolver::link;
use crate::similarity::DiceCoefficient;
use crate::source::collect_route_sources;
use crate::writer::{absolute_urls, write_sitemap};

/// 1 回の生成結果
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    /// ルート URL 付きの最終 URL 一覧
    pub urls: Vec<String>,
    /// 書き出したファイル。出力形式が未対応なら `None`
    pub written: Option<PathBuf>,
}

/// ルーティングファイルを読み込み、リンク済みのルートツリーを作る
pub fn build_forest(options: &SitemapOptions) -> Result<Forest> {
    let sources = collect_route_sources(&options.cwd, &options.src)?;
    let document = build_document(&sources);
    if document.is_empty() {
        warn!("ルート宣言が見つかりませんでした: {}", options.cwd.display());
    }

    let forest = link(document, &DiceCoefficient);
    debug!("ルートファイル: {:?}", forest.root_identifiers());
    Ok(forest)
}

/// 抽出 → リンク → パス化 → 整理 → 書き出し を順に実行する。
///
/// 出力形式が未対応の場合はエラーをログに出し、ファイルは書かずに URL 一覧だけ返す。
pub fn generate(options: &SitemapOptions) -> Result<Generated> {
    if options.root_url.is_empty() {
        warn!("rootUrl が設定されていません。相対パスのまま出力します");
    }

    let forest = build_forest(options)?;
    let paths = flatten("", &forest);
    let paths = normalize(paths, &options.normalize_options());
    let urls = absolute_urls(options.root_url(), &paths);

    let written = match write_sitemap(&urls, &options.output, &options.dest) {
        Ok(file) => Some(file),
        Err(e @ SitemapError::UnsupportedOutputFormat(_)) => {
            error!("{}", e);
            None
        }
        Err(e) => return Err(e),
    };

    Ok(Generated { urls, written })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn sample_project(root: &Path) {
        write(
            root,
            "src/app/app.routes.ts",
            r#"
            export const routes: Routes = [
                { path: '', component: HomeComponent },
                { path: 'admin', loadChildren: () => import('./admin/admin.module').then(m => m.AdminModule) },
                { path: 'secret', component: SecretComponent },
                { path: '**', component: NotFoundComponent },
            ];
            "#,
        );
        write(
            root,
            "src/app/admin/admin.routes.ts",
            r#"
            const routes: Routes = [
                { path: '', component: AdminHomeComponent },
                { path: 'users', component: UsersComponent },
                { path: 'users/:id', component: UserDetailComponent },
            ];
            "#,
        );
        write(root, "src/app/app.component.ts", "{ path: 'ignored', component: X }");
    }

    fn options(root: &Path, output: &str) -> SitemapOptions {
        SitemapOptions {
            root_url: "https://test.com/".to_string(),
            dest: root.join("dist"),
            ignore: vec!["secret".to_string()],
            output: output.to_string(),
            manual: vec!["/extra".to_string()],
            cwd: root.join("src"),
            src: vec!["**/*.routes.ts".to_string()],
        }
    }

    #[test]
    fn test_generate_txt() {
        let dir = tempfile::tempdir().unwrap();
        sample_project(dir.path());

        let generated = generate(&options(dir.path(), "txt")).unwrap();
        assert_eq!(
            generated.urls,
            vec![
                "https://test.com",
                "https://test.com/admin",
                "https://test.com/admin/users",
                "https://test.com/extra",
            ]
        );

        // ルート ('' と '**') はルート URL 1 件にまとめられる
        assert!(!generated.urls.iter().any(|u| u == "https://test.com/"));

        let file = generated.written.unwrap();
        assert_eq!(file, dir.path().join("dist").join("sitemap.txt"));
        assert_eq!(fs::read_to_string(file).unwrap(), generated.urls.join("\n"));
    }

    #[test]
    fn test_generate_xml() {
        let dir = tempfile::tempdir().unwrap();
        sample_project(dir.path());

        let generated = generate(&options(dir.path(), "xml")).unwrap();
        let xml = fs::read_to_string(generated.written.unwrap()).unwrap();
        for url in &generated.urls {
            assert!(xml.contains(&format!("<loc>{url}</loc>")));
        }
    }

    #[test]
    fn test_generate_unsupported_output_still_returns_urls() {
        let dir = tempfile::tempdir().unwrap();
        sample_project(dir.path());

        let generated = generate(&options(dir.path(), "csv")).unwrap();
        assert!(generated.written.is_none());
        assert_eq!(generated.urls.len(), 4);
        assert!(!dir.path().join("dist").exists());
    }

    #[test]
    fn test_generate_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate(&options(dir.path(), "txt")).unwrap_err();
        assert!(matches!(err, SitemapError::SourceNotFound(_)));
    }

    #[test]
    fn test_generate_properties() {
        let dir = tempfile::tempdir().unwrap();
        sample_project(dir.path());

        let generated = generate(&options(dir.path(), "txt")).unwrap();
        let mut sorted = generated.urls.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted, generated.urls);

        for url in &generated.urls {
            let path = url.strip_prefix("https://test.com").unwrap();
            assert!(!path.contains(':'));
            assert!(!path.ends_with('/'));
            assert!(!path.contains("/**"));
        }
    }

    #[test]
    fn test_build_forest_absorbs_admin() {
        let dir = tempfile::tempdir().unwrap();
        sample_project(dir.path());

        let forest = build_forest(&options(dir.path(), "txt")).unwrap();
        assert_eq!(forest.root_identifiers(), vec!["app/app.routes.ts"]);
    }
}
