use crate::models::paper::PaperRecord;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 JSON 文件加载论文列表（顶层为数组）
pub async fn load_papers_from_json(json_file_path: &Path) -> Result<Vec<PaperRecord>> {
    let content = fs::read_to_string(json_file_path)
        .await
        .with_context(|| format!("无法读取论文文件: {}", json_file_path.display()))?;

    let papers: Vec<PaperRecord> = serde_json::from_str(&content)
        .with_context(|| format!("无法解析论文文件: {}", json_file_path.display()))?;

    tracing::info!(
        "从 {} 加载了 {} 篇论文",
        json_file_path.display(),
        papers.len()
    );

    Ok(papers)
}
