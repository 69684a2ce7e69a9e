//! 论文流水线 - 编排层
//!
//! 过滤 → 重新分批 → 摘要。批次严格顺序执行；任一批重试耗尽即终止整个流程。

use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::error::BatchResult;
use crate::models::{PaperRecord, ReportEntry};
use crate::services::{CompletionService, FilterStage, PromptTemplates, SummarizeStage};
use crate::utils::create_balanced_batches;
use crate::utils::logging::{log_batch_complete, log_batch_start, log_stage_start};
use crate::workflow::{BatchProcessor, BatchTask};

/// 流水线结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// 没有输入论文
    NoPapers,
    /// 所有论文都被过滤掉
    NoneSelected { screened: usize },
    /// 入选论文及其摘要，保持原始顺序
    Completed(Vec<ReportEntry>),
}

/// 论文流水线
pub struct Pipeline<'a, C: ?Sized> {
    processor: BatchProcessor<'a, C>,
    filter: FilterStage,
    summarize: SummarizeStage,
    batch_size: usize,
}

impl<'a, C: CompletionService + ?Sized> Pipeline<'a, C> {
    pub fn new(
        completion: &'a C,
        templates: &PromptTemplates,
        filter_statement: &str,
        batch_size: usize,
        retry_delay: Duration,
    ) -> Self {
        Self {
            processor: BatchProcessor::new(completion, retry_delay),
            filter: FilterStage::new(templates.filter.as_str(), filter_statement),
            summarize: SummarizeStage::new(templates.summary.as_str()),
            batch_size,
        }
    }

    pub fn from_config(completion: &'a C, templates: &PromptTemplates, config: &Config) -> Self {
        Self::new(
            completion,
            templates,
            &config.filter_statement,
            config.batch_size,
            Duration::from_secs(config.retry_delay_secs),
        )
    }

    /// 运行完整流程
    pub async fn run(&self, papers: &[PaperRecord]) -> BatchResult<PipelineOutcome> {
        if papers.is_empty() {
            info!("没有找到新论文");
            return Ok(PipelineOutcome::NoPapers);
        }

        let selected = self.filter_papers(papers).await?;
        if selected.is_empty() {
            info!("没有论文通过过滤条件");
            return Ok(PipelineOutcome::NoneSelected {
                screened: papers.len(),
            });
        }

        info!("{}/{} 篇论文通过过滤，开始摘要", selected.len(), papers.len());
        let entries = self.summarize_papers(&selected).await?;
        Ok(PipelineOutcome::Completed(entries))
    }

    /// 过滤阶段：返回判定为相关的论文，保持原始相对顺序
    pub async fn filter_papers(&self, papers: &[PaperRecord]) -> BatchResult<Vec<PaperRecord>> {
        let decisions = self.run_stage(&self.filter, papers).await?;

        Ok(papers
            .iter()
            .zip(decisions)
            .filter_map(|(paper, keep)| keep.then(|| paper.clone()))
            .collect())
    }

    /// 摘要阶段：每篇论文配上附带原文摘要的结构化摘要
    pub async fn summarize_papers(&self, papers: &[PaperRecord]) -> BatchResult<Vec<ReportEntry>> {
        let summaries = self.run_stage(&self.summarize, papers).await?;

        Ok(papers
            .iter()
            .zip(summaries.iter())
            .map(|(paper, summary)| ReportEntry::new(paper.clone(), summary))
            .collect())
    }

    /// 分批顺序执行一个阶段，结果按论文顺序拼接
    async fn run_stage<T: BatchTask>(
        &self,
        task: &T,
        papers: &[PaperRecord],
    ) -> BatchResult<Vec<T::Output>> {
        let batches = create_balanced_batches(papers, self.batch_size);
        log_stage_start(task.stage(), papers.len(), batches.len());

        let mut outputs = Vec::with_capacity(papers.len());
        for (index, batch) in batches.iter().enumerate() {
            let batch_num = index + 1;
            log_batch_start(task.stage(), batch_num, batches.len(), batch.len());

            let results = self.processor.process(task, batch, batch_num).await?;
            log_batch_complete(task.stage(), batch_num, results.len(), batch.len());
            outputs.extend(results);
        }

        Ok(outputs)
    }
}
