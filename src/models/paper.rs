use serde::{Deserialize, Serialize};

/// 一篇论文的元数据
///
/// 由论文来源（arXiv 检索或离线 JSON）产生，流水线中只读。
/// 同一次运行中 `id` 通常唯一，但流水线不做去重，重复项按独立条目处理。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    #[serde(alias = "arxiv_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    /// 摘要原文
    #[serde(alias = "abstract")]
    pub summary: String,
    #[serde(default, alias = "primary_category")]
    pub category: String,
    #[serde(alias = "url")]
    pub pdf_url: String,
}

impl PaperRecord {
    /// 作者列表，逗号分隔
    pub fn authors_joined(&self) -> String {
        self.authors.join(", ")
    }
}

/// 按固定版式渲染一批论文，供提示词模板使用
///
/// ```text
/// Paper 1
/// Title: ...
/// Abstract:
/// ...
/// ```
///
/// 多篇论文之间以空行分隔，序号从 1 开始。
pub fn format_papers(papers: &[PaperRecord]) -> String {
    papers
        .iter()
        .enumerate()
        .map(|(i, paper)| {
            format!(
                "Paper {}\nTitle: {}\nAbstract:\n{}",
                i + 1,
                paper.title,
                paper.summary
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(title: &str, summary: &str) -> PaperRecord {
        PaperRecord {
            id: "2401.00001".to_string(),
            title: title.to_string(),
            authors: vec!["Ada Lovelace".to_string(), "Alan Turing".to_string()],
            summary: summary.to_string(),
            category: "cs.CL".to_string(),
            pdf_url: "https://arxiv.org/pdf/2401.00001".to_string(),
        }
    }

    #[test]
    fn test_format_papers_layout() {
        let papers = vec![paper("First", "Abstract one."), paper("Second", "Abstract two.")];

        assert_eq!(
            format_papers(&papers),
            "Paper 1\nTitle: First\nAbstract:\nAbstract one.\n\n\
             Paper 2\nTitle: Second\nAbstract:\nAbstract two."
        );
    }

    #[test]
    fn test_format_papers_empty() {
        assert_eq!(format_papers(&[]), "");
    }

    #[test]
    fn test_authors_joined() {
        assert_eq!(paper("t", "s").authors_joined(), "Ada Lovelace, Alan Turing");
    }

    #[test]
    fn test_deserialize_with_source_field_names() {
        let json = r#"{
            "arxiv_id": "2401.00002",
            "title": "T",
            "authors": ["A"],
            "summary": "S",
            "primary_category": "cs.LG",
            "pdf_url": "https://arxiv.org/pdf/2401.00002"
        }"#;
        let paper: PaperRecord = serde_json::from_str(json).unwrap();

        assert_eq!(paper.id, "2401.00002");
        assert_eq!(paper.category, "cs.LG");
    }
}
