//! 报告写入服务 - 业务能力层
//!
//! 只负责"把入选论文追加到月度报告"，不关心流程

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::models::ReportEntry;

/// 月度报告写入服务
///
/// 报告按 `YYYY-MM.md` 命名，每次运行在文件末尾追加一个新的 `# YYYY-MM` 段落，
/// 不覆盖已有内容。
pub struct ReportWriter {
    report_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(report_dir: impl Into<PathBuf>) -> Self {
        Self {
            report_dir: report_dir.into(),
        }
    }

    /// 当前月份，例如 `2026-10`
    pub fn current_month() -> String {
        chrono::Local::now().format("%Y-%m").to_string()
    }

    pub fn report_path(&self, month: &str) -> PathBuf {
        self.report_dir.join(format!("{}.md", month))
    }

    /// 渲染一次运行的报告内容
    pub fn render(month: &str, entries: &[ReportEntry]) -> String {
        let mut out = format!("# {}\n\n", month);
        for entry in entries {
            out.push_str(&format!("## {}\n\n", entry.paper.title));
            out.push_str(&format!("**Authors:** {}\n", entry.paper.authors_joined()));
            out.push_str(&format!("**Link:** {}\n\n", entry.paper.pdf_url));
            for (name, text) in entry.summary.fields() {
                out.push_str(&format!("### {}\n{}\n\n", name, text));
            }
        }
        out
    }

    /// 追加到当前月份的报告，返回报告路径
    pub async fn append(&self, entries: &[ReportEntry]) -> Result<PathBuf> {
        self.append_for_month(&Self::current_month(), entries).await
    }

    pub async fn append_for_month(&self, month: &str, entries: &[ReportEntry]) -> Result<PathBuf> {
        fs::create_dir_all(&self.report_dir)
            .await
            .with_context(|| format!("无法创建报告目录: {}", self.report_dir.display()))?;

        let path = self.report_path(month);
        let content = Self::render(month, entries);
        debug!("写入报告: {} ({} 篇, {} 字节)", path.display(), entries.len(), content.len());

        append_to_file(&path, &content).await?;
        Ok(path)
    }
}

async fn append_to_file(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .with_context(|| format!("无法打开报告文件: {}", path.display()))?;
    file.write_all(content.as_bytes())
        .await
        .with_context(|| format!("写入报告文件失败: {}", path.display()))?;
    file.flush().await?;
    Ok(())
}
