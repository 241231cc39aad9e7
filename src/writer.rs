//! 整理済みパス一覧から絶対 URL を組み立て、txt / xml 形式で書き出す。

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::info;

use crate::error::{Result, SitemapError};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str = "http://www.sitemaps.org/schemas/sitemap/0.9 http://www.sitemaps.org/schemas/sitemap/0.9/sitemap.xsd";

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Txt,
    Xml,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Xml => "xml",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = SitemapError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "txt" => Ok(OutputFormat::Txt),
            "xml" => Ok(OutputFormat::Xml),
            other => Err(SitemapError::UnsupportedOutputFormat(other.to_string())),
        }
    }
}

/// ルート URL と整理済みパスから絶対 URL の一覧を作る。
///
/// 先頭はルート URL そのもの。パス "/" はルート URL と同じページなので重ねて出力しない。
pub fn absolute_urls(root_url: &str, paths: &[String]) -> Vec<String> {
    std::iter::once(root_url.to_string())
        .chain(
            paths
                .iter()
                .filter(|p| p.as_str() != "/")
                .map(|p| format!("{root_url}{p}")),
        )
        .collect()
}

pub fn render_txt(urls: &[String]) -> String {
    urls.join("\n")
}

fn xml_error(e: impl std::fmt::Display) -> SitemapError {
    SitemapError::Xml(e.to_string())
}

/// sitemaps.org 形式の XML を生成する
pub fn render_xml(urls: &[String], generated_at: DateTime<Utc>) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    let generator = format!(
        " Generated by {} {} ",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    writer
        .write_event(Event::Comment(BytesText::from_escaped(generator)))
        .map_err(xml_error)?;
    let timestamp = format!(" Generated at {} ", generated_at.to_rfc3339());
    writer
        .write_event(Event::Comment(BytesText::from_escaped(timestamp)))
        .map_err(xml_error)?;

    let urlset = BytesStart::new("urlset").with_attributes([
        ("xmlns", SITEMAP_NS),
        ("xmlns:xsi", XSI_NS),
        ("xsi:schemaLocation", SCHEMA_LOCATION),
    ]);
    writer.write_event(Event::Start(urlset)).map_err(xml_error)?;

    for url in urls {
        writer
            .write_event(Event::Start(BytesStart::new("url")))
            .map_err(xml_error)?;
        writer
            .write_event(Event::Start(BytesStart::new("loc")))
            .map_err(xml_error)?;
        writer
            .write_event(Event::Text(BytesText::new(url)))
            .map_err(xml_error)?;
        writer
            .write_event(Event::End(BytesEnd::new("loc")))
            .map_err(xml_error)?;
        writer
            .write_event(Event::End(BytesEnd::new("url")))
            .map_err(xml_error)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("urlset")))
        .map_err(xml_error)?;

    String::from_utf8(writer.into_inner()).map_err(xml_error)
}

/// `output` 形式で `dest/sitemap.<ext>` に書き出し、書き出したファイルのパスを返す。
///
/// 未対応の形式なら `UnsupportedOutputFormat` を返し、ファイルは作らない。
pub fn write_sitemap(urls: &[String], output: &str, dest: &Path) -> Result<PathBuf> {
    let format: OutputFormat = output.parse()?;

    let contents = match format {
        OutputFormat::Txt => render_txt(urls),
        OutputFormat::Xml => render_xml(urls, Utc::now())?,
    };

    fs::create_dir_all(dest)?;
    let file = dest.join(format!("sitemap.{}", format.extension()));
    fs::write(&file, contents)?;

    info!("{} 件の URL を {} に書き出しました", urls.len(), file.display());
    Ok(file)
}
