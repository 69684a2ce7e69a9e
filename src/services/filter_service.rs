//! 过滤服务 - 业务能力层
//!
//! 只负责"这批论文里哪些和读者相关"的判断，不关心重试和批次编排

use crate::error::ProcessingError;
use crate::models::{format_papers, PaperRecord};
use crate::services::prompts::{render, FILTER_STATEMENT_PLACEHOLDER, PAPERS_PLACEHOLDER};
use crate::workflow::batch_flow::{ensure_len, parse_json_block, BatchTask};

/// 过滤阶段：每篇论文一个布尔值
pub struct FilterStage {
    template: String,
    filter_statement: String,
}

impl FilterStage {
    pub fn new(template: impl Into<String>, filter_statement: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            filter_statement: filter_statement.into(),
        }
    }
}

impl BatchTask for FilterStage {
    type Output = bool;

    fn stage(&self) -> &'static str {
        "过滤"
    }

    fn build_prompt(&self, papers: &[PaperRecord]) -> String {
        let papers = format_papers(papers);
        render(
            &self.template,
            &[
                (FILTER_STATEMENT_PLACEHOLDER, self.filter_statement.as_str()),
                (PAPERS_PLACEHOLDER, papers.as_str()),
            ],
        )
    }

    fn parse_response(
        &self,
        completion: &str,
        papers: &[PaperRecord],
    ) -> Result<Vec<bool>, ProcessingError> {
        let decisions: Vec<bool> = parse_json_block(completion)?;
        ensure_len(papers.len(), decisions.len())?;
        Ok(decisions)
    }
}
