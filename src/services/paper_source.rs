//! 论文来源能力
//!
//! 只负责"给出一批候选论文"，不关心过滤和摘要

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::PathBuf;

use crate::models::{load_papers_from_json, PaperRecord};

/// 一次检索的条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// 在摘要中检索的关键词
    pub keyword: String,
    /// 接受的主分类
    pub categories: Vec<String>,
    /// 提交日期下界（含）
    pub from_date: NaiveDate,
    /// 提交日期上界（含）
    pub to_date: NaiveDate,
}

impl SearchQuery {
    /// 以 `today` 为终点，向前 `lookback_days` 天
    pub fn recent(
        keyword: impl Into<String>,
        categories: Vec<String>,
        today: NaiveDate,
        lookback_days: i64,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            categories,
            from_date: today - chrono::Duration::days(lookback_days.max(0)),
            to_date: today,
        }
    }
}

/// 论文来源
#[async_trait]
pub trait PaperSource: Send + Sync {
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<PaperRecord>>;
}

/// 离线论文文件
///
/// 直接返回文件中的论文（按分类过滤），不访问网络
pub struct JsonPaperFile {
    path: PathBuf,
}

impl JsonPaperFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PaperSource for JsonPaperFile {
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<PaperRecord>> {
        let papers = load_papers_from_json(&self.path).await?;
        Ok(papers
            .into_iter()
            .filter(|paper| paper.category.is_empty() || query.categories.contains(&paper.category))
            .collect())
    }
}
