//! # arXiv Digest
//!
//! 检索最近提交的 arXiv 论文，用 LLM 按批判断相关性、生成结构化摘要，
//! 并追加到按月份命名的 Markdown 报告中。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 与外部服务通信，只暴露能力
//! - `LlmClient` - 兼容 OpenAI 的补全接口
//! - `ArxivClient` - arXiv 高级检索页面抓取与解析
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理一批论文
//! - `FilterStage` / `SummarizeStage` - 提示词 + 结果解析校验
//! - `ReportWriter` - 写月度报告
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一批论文"的完整处理流程
//! - `BatchProcessor` - 补全 → 提取 JSON → 解析 → 校验，失败整批重试（最多 3 次）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/pipeline` - 均衡分批，过滤 → 摘要
//! - `orchestrator/app` - 检索、运行流水线、写报告
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{BatchError, CompletionError, ExtractError, ProcessingError, ValidationError};
pub use models::{PaperRecord, PaperSummary, ReportEntry};
pub use orchestrator::{App, Pipeline, PipelineOutcome, RunSummary};
pub use services::CompletionService;
pub use workflow::{BatchProcessor, BatchTask};
