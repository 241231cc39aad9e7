use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::model::{Document, RouteRecord};
use crate::source::SourceFile;

/// `{ path: 'home', component: HomeComponent }` のように path の直後に component が続く宣言
static COMPONENT_ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bpath\s*:\s*['"`]([^'"`]*)['"`]\s*,\s*component\s*:"#)
        .expect("component route pattern")
});

/// `{ path: 'admin', loadChildren: () => import('./admin/admin.module').then(...) }` と
/// 旧来の文字列形式 `loadChildren: './admin/admin.module#AdminModule'` の両方。
/// path と loadChildren の間には `data: { ... }` のような 1 段の入れ子だけを許し、
/// オブジェクトの境界 (`{` `}` `;`) はまたがない
static LAZY_ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"\bpath\s*:\s*['"`]([^'"`]*)['"`]\s*,(?:[^;{}]|\{[^{}]*\})*?"#,
        r#"\bloadChildren\s*:\s*(?:(?:async\s*)?\(\s*\)\s*=>\s*import\s*\(\s*)?"#,
        r#"['"`]([^'"`]*)['"`]"#,
    ))
    .expect("lazy route pattern")
});

/// ファイル全体のテキストからルート宣言を抽出する。
///
/// 構文解析は行わず、2 種類のパターンをテキスト全体に対して繰り返し適用する。
/// 結果はソース上の出現順に並ぶ。
pub fn extract_routes(contents: &str) -> Vec<RouteRecord> {
    let mut found: Vec<(usize, RouteRecord)> = Vec::new();

    // 1) 末端のコンポーネントルート
    for caps in COMPONENT_ROUTE.captures_iter(contents) {
        let start = caps.get(0).map_or(0, |m| m.start());
        found.push((start, RouteRecord::component(&caps[1])));
    }

    // 2) ルーティングファイル間のリンク
    for caps in LAZY_ROUTE.captures_iter(contents) {
        let start = caps.get(0).map_or(0, |m| m.start());
        found.push((start, RouteRecord::lazy(&caps[1], &caps[2])));
    }

    // 3) 出現位置順に並べ替え (安定ソート)
    found.sort_by_key(|(start, _)| *start);
    found.into_iter().map(|(_, record)| record).collect()
}

/// 読み込んだ全ファイルから Document を構築する。
/// ルート宣言が 1 件も見つからないファイルは Document に含めない
pub fn build_document(sources: &[SourceFile]) -> Document {
    info!("ファイルから情報を収集中...");

    let mut document = Document::new();
    for source in sources {
        info!("\t解析中: {}", source.identifier);
        let records = extract_routes(&source.contents);
        for record in &records {
            debug!(
                "  → ルート発見: path={:?}, loadChildren={:?}",
                record.path, record.reference
            );
        }
        document.insert(source.identifier.clone(), records);
    }

    info!(
        "ルート宣言を含むファイル: {} / {}",
        document.len(),
        sources.len()
    );
    document
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_route() {
        let routes = extract_routes("const routes: Routes = [{path:'a', component: X}];");
        assert_eq!(routes, vec![RouteRecord::component("a")]);
    }

    #[test]
    fn test_all_occurrences_in_source_order() {
        let src = r#"
            export const routes: Routes = [
                { path: '', component: HomeComponent },
                { path: 'admin', loadChildren: () => import('./admin/admin.module').then(m => m.AdminModule) },
                { path: "about", component: AboutComponent },
                { path: '**', component: NotFoundComponent },
            ];
        "#;

        let routes = extract_routes(src);
        assert_eq!(
            routes,
            vec![
                RouteRecord::component(""),
                RouteRecord::lazy("admin", "./admin/admin.module"),
                RouteRecord::component("about"),
                RouteRecord::component("**"),
            ]
        );
    }

    #[test]
    fn test_legacy_string_load_children() {
        let src = "{ path: 'shop', loadChildren: './shop/shop.module#ShopModule' }";
        assert_eq!(
            extract_routes(src),
            vec![RouteRecord::lazy("shop", "./shop/shop.module#ShopModule")]
        );
    }

    #[test]
    fn test_load_children_after_other_keys() {
        let src = "{ path: 'secure', canActivate: [AuthGuard], loadChildren: async () => import(\"./secure/secure.module\") }";
        assert_eq!(
            extract_routes(src),
            vec![RouteRecord::lazy("secure", "./secure/secure.module")]
        );
    }

    #[test]
    fn test_load_children_after_nested_objects() {
        let src = r#"
            { path: 'admin', data: { preload: true }, resolve: { user: UserResolver },
              loadChildren: () => import('./admin/admin.module').then(m => m.AdminModule) }
        "#;
        assert_eq!(
            extract_routes(src),
            vec![RouteRecord::lazy("admin", "./admin/admin.module")]
        );
    }

    #[test]
    fn test_does_not_link_across_objects() {
        // 1 つ目のオブジェクトの path と 2 つ目の loadChildren を結び付けない
        let src = "{ path: 'a', redirectTo: 'b' }, { loadChildren: () => import('./x') }";
        assert!(extract_routes(src).is_empty());
    }

    #[test]
    fn test_component_must_follow_path() {
        let src = "{ path: 'a', data: { title: 'A' }, component: AComponent }";
        assert!(extract_routes(src).is_empty());
    }

    #[test]
    fn test_build_document_skips_files_without_routes() {
        let sources = vec![
            SourceFile {
                identifier: "app.routes.ts".to_string(),
                contents: "[{ path: 'home', component: Home }]".to_string(),
            },
            SourceFile {
                identifier: "empty.routes.ts".to_string(),
                contents: "export const routes = [];".to_string(),
            },
        ];

        let document = build_document(&sources);
        assert_eq!(document.identifiers(), vec!["app.routes.ts".to_string()]);
        assert_eq!(document.files[0].records, vec![RouteRecord::component("home")]);
    }
}
