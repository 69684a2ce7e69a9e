//! 文本补全能力
//!
//! 流水线只依赖"给一段提示词，返回一段文本"这一能力，
//! 具体由 `clients::LlmClient` 实现，测试中可替换为脚本化的假实现。

use crate::error::CompletionError;
use async_trait::async_trait;

/// 文本补全服务
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// 服务名称（用于日志）
    fn name(&self) -> &str;

    /// 提交提示词，返回补全文本
    ///
    /// 网络错误、限流、超时等都以 `CompletionError` 返回，调用方会整批重试。
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

