//! 错误类型
//!
//! 流水线核心使用强类型错误，便于重试层区分"可重试的处理失败"和"致命失败"；
//! 应用层胶水代码（main / App / 加载器 / 报告写入）仍然使用 `anyhow::Result`。

use thiserror::Error;

/// 从 LLM 输出中提取 JSON 块时的错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// 文本中没有任何开括号
    #[error("未找到 JSON 块")]
    NoJsonBlockFound,
    /// 文本结束时仍有未闭合的括号
    #[error("存在未闭合的括号 (深度: {depth})")]
    UnclosedBrackets { depth: usize },
    /// 闭括号与栈顶开括号不匹配
    #[error("括号不匹配 (位置 {position}: 期望 '{expected}', 实际 '{found}')")]
    MismatchedBracket {
        position: usize,
        expected: char,
        found: char,
    },
    /// 出现了没有对应开括号的闭括号
    #[error("多余的闭括号 (位置 {position})")]
    UnmatchedClosingBracket { position: usize },
}

/// 结果形状校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 结果数量与批次大小不一致
    #[error("期望 {expected} 个结果，实际得到 {actual} 个")]
    LengthMismatch { expected: usize, actual: usize },
    /// 摘要缺少必需字段
    #[error("第 {index} 条摘要缺少字段 `{field}`")]
    MissingField { index: usize, field: &'static str },
    /// 摘要必需字段为空
    #[error("第 {index} 条摘要的字段 `{field}` 为空")]
    EmptyField { index: usize, field: &'static str },
}

/// 补全服务（LLM）调用失败，均视为暂时性错误
#[derive(Debug, Error)]
pub enum CompletionError {
    /// API 调用失败（网络、限流、上游响应异常）
    #[error("LLM API 调用失败 (模型: {model}): {source}")]
    Request {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回内容为空
    #[error("LLM 返回内容为空 (模型: {model})")]
    EmptyResponse { model: String },
    /// 调用超时
    #[error("LLM 调用超时 ({secs} 秒)")]
    Timeout { secs: u64 },
}

/// 单次批处理尝试失败，一律触发整批重试
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("提取 JSON 块失败: {0}")]
    Extract(#[from] ExtractError),
    #[error("JSON 解析失败: {0}")]
    Parse(String),
    #[error("结果校验失败: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

impl From<serde_json::Error> for ProcessingError {
    fn from(err: serde_json::Error) -> Self {
        ProcessingError::Parse(err.to_string())
    }
}

/// 批次在重试耗尽后的致命错误，会终止整个运行
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("{stage} 第 {batch} 批在 {attempts} 次尝试后仍然失败: {last_error}")]
    RetriesExhausted {
        stage: &'static str,
        batch: usize,
        attempts: usize,
        #[source]
        last_error: ProcessingError,
    },
}

/// 配置错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("batch_size 必须大于 0")]
    InvalidBatchSize,
    #[error("categories 不能为空")]
    EmptyCategories,
    #[error("filter_statement 不能为空")]
    EmptyFilterStatement,
    #[error("缺少 LLM API 密钥 (环境变量 {var_name})")]
    MissingApiKey { var_name: &'static str },
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: &'static str,
        value: String,
        expected_type: &'static str,
    },
}

/// 流水线核心结果类型
pub type BatchResult<T> = std::result::Result<T, BatchError>;
