//! arXiv 高级检索客户端
//!
//! 请求 arXiv 的高级检索页面并解析 HTML 结果列表

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info};

use crate::models::PaperRecord;
use crate::services::{PaperSource, SearchQuery};

const SEARCH_URL: &str = "https://arxiv.org/search/advanced";
const PDF_URL_PREFIX: &str = "https://arxiv.org/pdf/";
const PAGE_SIZE: &str = "100";

/// arXiv 客户端
pub struct ArxivClient {
    http: reqwest::Client,
}

impl ArxivClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("arxiv_digest/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("无法创建 HTTP 客户端")?;
        Ok(Self { http })
    }

    /// 构建高级检索 URL：在摘要中检索关键词，按首次提交日期限定范围，最新的在前
    pub fn search_url(query: &SearchQuery) -> Result<Url> {
        let from_date = query.from_date.format("%Y-%m-%d").to_string();
        let to_date = query.to_date.format("%Y-%m-%d").to_string();
        let params = [
            ("advanced", ""),
            ("terms-0-operator", "AND"),
            ("terms-0-term", query.keyword.as_str()),
            ("terms-0-field", "abstract"),
            ("classification-physics_archives", "all"),
            ("classification-include_cross_list", "include"),
            ("date-year", ""),
            ("date-filter_by", "date_range"),
            ("date-from_date", from_date.as_str()),
            ("date-to_date", to_date.as_str()),
            ("date-date_type", "submitted_date_first"),
            ("abstracts", "show"),
            ("size", PAGE_SIZE),
            ("order", "-announced_date_first"),
        ];
        Url::parse_with_params(SEARCH_URL, &params).context("无法构建 arXiv 检索 URL")
    }
}

#[async_trait]
impl PaperSource for ArxivClient {
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<PaperRecord>> {
        let url = Self::search_url(query)?;
        info!("🔍 检索 arXiv: {}", url);

        let html = self
            .http
            .get(url)
            .send()
            .await
            .context("arXiv 请求失败")?
            .error_for_status()
            .context("arXiv 返回错误状态")?
            .text()
            .await
            .context("无法读取 arXiv 响应")?;

        parse_search_results(&html, &query.categories)
    }
}

/// 解析检索结果页面
///
/// 只保留主分类在 `categories` 中的条目；缺少链接、分类、标题、作者或摘要的条目直接跳过。
pub fn parse_search_results(html: &str, categories: &[String]) -> Result<Vec<PaperRecord>> {
    let document = Html::parse_document(html);
    let result_sel = selector("li.arxiv-result")?;
    let selectors = EntrySelectors::new()?;

    let mut papers = Vec::new();
    for result in document.select(&result_sel) {
        match selectors.parse_entry(result, categories) {
            Some(paper) => papers.push(paper),
            None => debug!("跳过一条不完整或分类不符的检索结果"),
        }
    }

    info!("✓ 解析到 {} 篇符合分类的论文", papers.len());
    Ok(papers)
}

struct EntrySelectors {
    abs_link: Selector,
    tag: Selector,
    title: Selector,
    authors: Selector,
    author_link: Selector,
    abstract_p: Selector,
    abstract_full: Selector,
    abstract_short: Selector,
}

impl EntrySelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            abs_link: selector(r#"a[href*="/abs/"]"#)?,
            tag: selector("span.tag")?,
            title: selector("p.title")?,
            authors: selector("p.authors")?,
            author_link: selector("a")?,
            abstract_p: selector("p.abstract")?,
            abstract_full: selector("span.abstract-full")?,
            abstract_short: selector("span.abstract-short")?,
        })
    }

    fn parse_entry(&self, result: ElementRef<'_>, categories: &[String]) -> Option<PaperRecord> {
        let href = result.select(&self.abs_link).next()?.value().attr("href")?;
        let id = href.rsplit("/abs/").next()?.trim().to_string();

        let category = collapse_whitespace(&result.select(&self.tag).next()?.text().collect::<String>());
        if !categories.contains(&category) {
            return None;
        }

        let title = collapse_whitespace(&result.select(&self.title).next()?.text().collect::<String>());
        let authors = result
            .select(&self.authors)
            .next()?
            .select(&self.author_link)
            .map(|a| collapse_whitespace(&a.text().collect::<String>()))
            .collect();

        let abstract_p = result.select(&self.abstract_p).next()?;
        let summary = match abstract_p
            .select(&self.abstract_full)
            .next()
            .or_else(|| abstract_p.select(&self.abstract_short).next())
        {
            Some(span) => text_without_links(span),
            None => abstract_p.text().collect::<String>().replace("Abstract:", ""),
        };

        Some(PaperRecord {
            pdf_url: format!("{}{}", PDF_URL_PREFIX, id),
            id,
            title,
            authors,
            summary: collapse_whitespace(&summary),
            category,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("无效的 CSS 选择器 {}: {:?}", css, e))
}

/// 元素文本，去掉 `<a>` 内的文字（例如 "△ Less" 折叠按钮）
fn text_without_links(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    push_text_without_links(element, &mut out);
    out
}

fn push_text_without_links(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if child_element.value().name() != "a" {
                push_text_without_links(child_element, out);
            }
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
