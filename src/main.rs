// src/main.rs

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

mod config;
mod error;
mod flatten;
mod logging;
mod model;
mod normalize;
mod parser;
mod pipeline;
mod resolver;
mod similarity;
mod source;
mod writer;

use config::{Overrides, SitemapOptions};

/// CLI 引数定義
#[derive(Parser, Debug)]
#[command(
    name = "Angular Sitemap",
    version,
    about = "Angular プロジェクトのルーティングファイルからサイトマップ (xml / txt) を生成する CLI ツール"
)]
struct Cli {
    /// JSON 設定ファイル (rootUrl, dest, ignore, output, manual, cwd, src)
    /// 例: `--config sitemap.json`
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// 各 URL の先頭に付けるルート URL
    /// 例: `--root-url https://example.com/`
    #[arg(short = 'u', long = "root-url", value_name = "URL")]
    root_url: Option<String>,

    /// ルーティングファイルを探すソースディレクトリ
    #[arg(short = 'r', long = "cwd", value_name = "DIR")]
    cwd: Option<PathBuf>,

    /// `cwd` からの相対パスに対する glob パターン (複数指定可)
    #[arg(short = 's', long = "src", value_name = "GLOB")]
    src: Vec<String>,

    /// 出力先ディレクトリ
    #[arg(short = 'd', long = "dest", value_name = "DIR")]
    dest: Option<PathBuf>,

    /// 出力形式 (txt または xml)
    #[arg(short = 'o', long = "output", value_name = "FORMAT")]
    output: Option<String>,

    /// 出力から除外するパス (複数指定可)
    #[arg(short = 'i', long = "ignore", value_name = "PATH")]
    ignore: Vec<String>,

    /// 手動で追加するパス (複数指定可)
    #[arg(short = 'm', long = "manual", value_name = "PATH")]
    manual: Vec<String>,

    /// リンク済みのルートツリーを JSON で標準出力に出す (サイトマップは書き出さない)
    #[arg(long = "dump-routes")]
    dump_routes: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            root_url: self.root_url.clone(),
            dest: self.dest.clone(),
            ignore: self.ignore.clone(),
            output: self.output.clone(),
            manual: self.manual.clone(),
            cwd: self.cwd.clone(),
            src: self.src.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::setup_logging("angular_sitemap=info");

    // 1) CLI 引数をパースし、設定ファイルがあれば読み込んで上書きする
    let cli = Cli::parse();
    let base = match &cli.config {
        Some(path) => {
            info!("設定ファイル: {}", path.display());
            SitemapOptions::load(path)?
        }
        None => SitemapOptions::default(),
    };
    let options = cli.overrides().apply(base);

    // 2) ルートツリーの確認だけなら JSON 化して標準出力
    if cli.dump_routes {
        let forest = pipeline::build_forest(&options)?;
        println!("{}", serde_json::to_string_pretty(&forest)?);
        return Ok(());
    }

    // 3) サイトマップを生成
    let generated = pipeline::generate(&options)?;
    if generated.written.is_none() {
        for url in &generated.urls {
            println!("{}", url);
        }
    }

    Ok(())
}
