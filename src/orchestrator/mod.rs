//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 管理依赖（论文来源、LLM 客户端、报告写入）
//! - 输出全局统计信息
//!
//! ### `pipeline` - 论文流水线
//! - 均衡分批
//! - 过滤阶段 → 重新分批 → 摘要阶段
//! - 批次顺序执行，任一批失败即终止
//!
//! ## 层次关系
//!
//! ```text
//! app (检索 + 报告)
//!     ↓
//! pipeline (处理 Vec<PaperRecord>)
//!     ↓
//! workflow::BatchProcessor (处理单个批次，含重试)
//!     ↓
//! services (能力层：filter / summary / completion / report)
//!     ↓
//! clients (基础设施：LLM API、arXiv)
//! ```

pub mod app;
pub mod pipeline;

pub use app::{App, RunSummary};
pub use pipeline::{Pipeline, PipelineOutcome};
