//! サイトマップ生成のオプション。
//!
//! JSON 設定ファイル (キーは camelCase) を読み込み、CLI 引数で個別に上書きする。

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::normalize::NormalizeOptions;

/// 設定ファイルの例:
///
/// ```json
/// {
///   "rootUrl": "https://test.com/",
///   "dest": "dist",
///   "ignore": [],
///   "output": "xml",
///   "manual": [],
///   "cwd": "src",
///   "src": ["**/*.routes.ts"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SitemapOptions {
    /// 各 URL の先頭に付けるルート URL
    pub root_url: String,
    /// 出力先ディレクトリ
    pub dest: PathBuf,
    /// 出力から除外するパス
    pub ignore: Vec<String>,
    /// 出力形式 ("txt" または "xml")
    pub output: String,
    /// ルート宣言とは別に追加するパス
    pub manual: Vec<String>,
    /// ルーティングファイルを探すソースディレクトリ
    pub cwd: PathBuf,
    /// `cwd` からの相対パスに対する glob パターン
    pub src: Vec<String>,
}

impl Default for SitemapOptions {
    fn default() -> Self {
        Self {
            root_url: String::new(),
            dest: PathBuf::from("dist"),
            ignore: Vec::new(),
            output: "xml".to_string(),
            manual: Vec::new(),
            cwd: PathBuf::from("src"),
            src: vec!["**/*.routes.ts".to_string()],
        }
    }
}

impl SitemapOptions {
    /// JSON 設定ファイルを読み込む。書かれていない項目は既定値
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// 末尾の "/" を 1 つ取り除いたルート URL
    pub fn root_url(&self) -> &str {
        self.root_url.strip_suffix('/').unwrap_or(&self.root_url)
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            manual: self.manual.clone(),
            ignore: self.ignore.clone(),
        }
    }
}

/// CLI 引数による上書き。`None` / 空の項目は設定ファイルの値を残す
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub root_url: Option<String>,
    pub dest: Option<PathBuf>,
    pub ignore: Vec<String>,
    pub output: Option<String>,
    pub manual: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub src: Vec<String>,
}

impl Overrides {
    pub fn apply(self, mut options: SitemapOptions) -> SitemapOptions {
        if let Some(root_url) = self.root_url {
            options.root_url = root_url;
        }
        if let Some(dest) = self.dest {
            options.dest = dest;
        }
        if !self.ignore.is_empty() {
            options.ignore = self.ignore;
        }
        if let Some(output) = self.output {
            options.output = output;
        }
        if !self.manual.is_empty() {
            options.manual = self.manual;
        }
        if let Some(cwd) = self.cwd {
            options.cwd = cwd;
        }
        if !self.src.is_empty() {
            options.src = self.src;
        }
        options
    }
}
