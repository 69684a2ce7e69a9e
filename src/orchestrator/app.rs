//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：按配置选择论文来源、创建 LLM 客户端、加载提示词
//! 2. **检索**：获取最近提交的论文
//! 3. **流水线**：委托 `Pipeline` 完成过滤和摘要
//! 4. **输出**：把入选论文追加到月度报告并输出统计
//!
//! 某一批重试耗尽时直接返回错误，不写入任何报告内容（见 DESIGN.md）。

use anyhow::Result;
use tracing::{error, info, warn};

use crate::clients::{ArxivClient, LlmClient};
use crate::config::Config;
use crate::orchestrator::pipeline::{Pipeline, PipelineOutcome};
use crate::services::{
    CompletionService, JsonPaperFile, PaperSource, PromptTemplates, ReportWriter, SearchQuery,
};
use crate::utils::logging::{log_startup, print_final_stats};

/// 一次运行的结果摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunSummary {
    NoPapers,
    NoneSelected { screened: usize },
    Reported { found: usize, selected: usize, report_path: String },
}

/// 应用主结构
pub struct App {
    config: Config,
    source: Box<dyn PaperSource>,
    completion: Box<dyn CompletionService>,
    templates: PromptTemplates,
    writer: ReportWriter,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        let source: Box<dyn PaperSource> = match &config.papers_file {
            Some(path) => {
                info!("📁 使用离线论文文件: {}", path);
                Box::new(JsonPaperFile::new(path))
            }
            None => Box::new(ArxivClient::new()?),
        };
        let completion = Box::new(LlmClient::new(&config));
        Self::with_parts(config, source, completion)
    }

    /// 使用指定的论文来源和补全服务组装应用
    pub fn with_parts(
        config: Config,
        source: Box<dyn PaperSource>,
        completion: Box<dyn CompletionService>,
    ) -> Result<Self> {
        let templates = PromptTemplates::load(config.prompt_dir.as_deref())?;
        let writer = ReportWriter::new(&config.report_dir);
        info!("🤖 补全服务: {}", completion.name());
        Ok(Self {
            config,
            source,
            completion,
            templates,
            writer,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunSummary> {
        log_startup(
            &self.config.search_keyword,
            &self.config.categories,
            self.config.batch_size,
        );

        let query = SearchQuery::recent(
            self.config.search_keyword.as_str(),
            self.config.categories.clone(),
            chrono::Local::now().date_naive(),
            self.config.lookback_days,
        );
        let papers = self.source.fetch(&query).await?;

        if papers.is_empty() {
            warn!("⚠️ 今天没有找到新论文，程序结束");
            return Ok(RunSummary::NoPapers);
        }
        info!("✓ 找到 {} 篇论文，开始过滤和摘要", papers.len());

        let pipeline = Pipeline::from_config(self.completion.as_ref(), &self.templates, &self.config);
        let outcome = pipeline.run(&papers).await.inspect_err(|e| {
            error!("❌ 流水线终止: {}", e);
        })?;

        match outcome {
            PipelineOutcome::NoPapers => Ok(RunSummary::NoPapers),
            PipelineOutcome::NoneSelected { screened } => {
                warn!("⚠️ {} 篇论文均未通过过滤条件，不生成报告", screened);
                Ok(RunSummary::NoneSelected { screened })
            }
            PipelineOutcome::Completed(entries) => {
                let path = self.writer.append(&entries).await?;
                let report_path = path.display().to_string();
                print_final_stats(papers.len(), entries.len(), &report_path);
                Ok(RunSummary::Reported {
                    found: papers.len(),
                    selected: entries.len(),
                    report_path,
                })
            }
        }
    }
}
