//! 摘要服务 - 业务能力层
//!
//! 只负责"把一批论文变成结构化摘要"，不关心重试和批次编排

use serde_json::{Map, Value as JsonValue};

use crate::error::ProcessingError;
use crate::models::{format_papers, PaperRecord, PaperSummary};
use crate::services::prompts::{render, PAPERS_PLACEHOLDER};
use crate::workflow::batch_flow::{ensure_len, parse_json_block, BatchTask};

/// 摘要阶段：每篇论文一个至少包含 motivation / method 的摘要
pub struct SummarizeStage {
    template: String,
}

impl SummarizeStage {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl BatchTask for SummarizeStage {
    type Output = PaperSummary;

    fn stage(&self) -> &'static str {
        "摘要"
    }

    fn build_prompt(&self, papers: &[PaperRecord]) -> String {
        let papers = format_papers(papers);
        render(&self.template, &[(PAPERS_PLACEHOLDER, papers.as_str())])
    }

    fn parse_response(
        &self,
        completion: &str,
        papers: &[PaperRecord],
    ) -> Result<Vec<PaperSummary>, ProcessingError> {
        let objects: Vec<Map<String, JsonValue>> = parse_json_block(completion)?;
        ensure_len(papers.len(), objects.len())?;

        objects
            .into_iter()
            .enumerate()
            .map(|(index, object)| -> Result<PaperSummary, ProcessingError> {
                let fields = PaperSummary::fields_from_object(object).map_err(|field| {
                    ProcessingError::Parse(format!("第 {} 条摘要的字段 `{}` 不是字符串", index, field))
                })?;
                Ok(PaperSummary::from_fields(index, fields)?)
            })
            .collect()
    }
}
