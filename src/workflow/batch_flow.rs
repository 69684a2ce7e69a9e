//! 单批次处理流程 - 流程层
//!
//! 核心职责：定义"一批论文"的完整处理流程
//!
//! 流程顺序（每次尝试）：
//! 1. 按任务格式化提示词
//! 2. 调用补全服务
//! 3. 提取第一个 JSON 块 → 解析 → 校验
//! 4. 任一步失败 → 整批重试，最多 `MAX_ATTEMPTS` 次

use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::{BatchError, BatchResult, ProcessingError, ValidationError};
use crate::models::PaperRecord;
use crate::services::CompletionService;
use crate::utils::{find_first_json_block, truncate_text};
use crate::workflow::retry::retry_with_limit;

/// 每批最多尝试次数（含第一次）
pub const MAX_ATTEMPTS: usize = 3;

/// 一种批处理任务：如何构造提示词，如何把补全解析成每篇论文一个结果
pub trait BatchTask {
    type Output;

    /// 阶段名称（用于日志和错误信息）
    fn stage(&self) -> &'static str;

    fn build_prompt(&self, papers: &[PaperRecord]) -> String;

    /// 解析并校验补全文本，结果与 `papers` 一一对应
    fn parse_response(
        &self,
        completion: &str,
        papers: &[PaperRecord],
    ) -> Result<Vec<Self::Output>, ProcessingError>;
}

/// 批处理器：补全 + 解析 + 校验 + 整批重试
pub struct BatchProcessor<'a, C: ?Sized> {
    completion: &'a C,
    retry_delay: Duration,
}

impl<'a, C: CompletionService + ?Sized> BatchProcessor<'a, C> {
    pub fn new(completion: &'a C, retry_delay: Duration) -> Self {
        Self {
            completion,
            retry_delay,
        }
    }

    /// 处理一批论文
    ///
    /// # 参数
    /// - `task`: 批处理任务（过滤 / 摘要）
    /// - `batch`: 本批论文
    /// - `batch_num`: 批次编号（从 1 开始，仅用于日志）
    ///
    /// # 返回
    /// 与 `batch` 一一对应的结果；重试耗尽时返回致命的 `BatchError`
    pub async fn process<T: BatchTask>(
        &self,
        task: &T,
        batch: &[PaperRecord],
        batch_num: usize,
    ) -> BatchResult<Vec<T::Output>> {
        let label = format!("[{}] 第 {} 批", task.stage(), batch_num);

        retry_with_limit(MAX_ATTEMPTS, self.retry_delay, &label, |attempt| {
            debug!("{} 第 {}/{} 次尝试", label, attempt, MAX_ATTEMPTS);
            self.attempt(task, batch)
        })
        .await
        .map_err(|exhausted| BatchError::RetriesExhausted {
            stage: task.stage(),
            batch: batch_num,
            attempts: exhausted.attempts,
            last_error: exhausted.last_error,
        })
    }

    async fn attempt<T: BatchTask>(
        &self,
        task: &T,
        batch: &[PaperRecord],
    ) -> Result<Vec<T::Output>, ProcessingError> {
        let prompt = task.build_prompt(batch);
        debug!("提示词: {}", truncate_text(&prompt, 300));

        let completion = self.completion.complete(&prompt).await?;
        task.parse_response(&completion, batch)
    }
}

/// 提取补全中的第一个 JSON 块并反序列化
pub fn parse_json_block<T: DeserializeOwned>(completion: &str) -> Result<T, ProcessingError> {
    let (block, _) = find_first_json_block(completion)?;
    Ok(serde_json::from_str(block)?)
}

/// 校验结果数量与批次大小一致
pub fn ensure_len(expected: usize, actual: usize) -> Result<(), ValidationError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ValidationError::LengthMismatch { expected, actual })
    }
}
