//! LLM API 客户端
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Qwen, Doubao 等）

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::CompletionError;
use crate::services::CompletionService;
use crate::utils::truncate_text;

const SYSTEM_MESSAGE: &str = "You are a careful research assistant. \
    Always answer with exactly one JSON value and nothing that could be mistaken for another JSON value.";

/// LLM 客户端
///
/// 职责：
/// - 调用兼容 OpenAI 的 Chat Completions 接口
/// - 每次调用带超时，超时视为暂时性错误
/// - 不解析输出，不关心批次
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model_name: String,
    max_tokens: u32,
    timeout: Duration,
}

impl LlmClient {
    /// 创建新的 LLM 客户端
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            max_tokens: config.llm_max_tokens,
            timeout: Duration::from_secs(config.llm_timeout_secs),
        }
    }

    fn request_error(&self, source: OpenAIError) -> CompletionError {
        CompletionError::Request {
            model: self.model_name.clone(),
            source: Box::new(source),
        }
    }

    /// 发送一轮对话，返回去掉首尾空白的回复
    async fn send_to_llm(&self, user_message: &str) -> Result<String, CompletionError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(SYSTEM_MESSAGE)
            .build()
            .map_err(|e| self.request_error(e))?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| self.request_error(e))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_msg),
                ChatCompletionRequestMessage::User(user_msg),
            ])
            .temperature(0.3)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| self.request_error(e))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| {
                warn!("LLM API 调用失败: {}", e);
                self.request_error(e)
            })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| CompletionError::EmptyResponse {
                model: self.model_name.clone(),
            })?;

        debug!("LLM 响应: {}", truncate_text(&content, 200));

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl CompletionService for LlmClient {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        match tokio::time::timeout(self.timeout, self.send_to_llm(prompt)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("LLM 调用超时 ({:?})", self.timeout);
                Err(CompletionError::Timeout {
                    secs: self.timeout.as_secs(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> Config {
        Config {
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or_else(|_| "sk-test".to_string()),
            ..Config::default()
        }
        .apply_env()
        .unwrap()
    }

    #[test]
    fn test_client_uses_config() {
        let config = Config {
            llm_model_name: "qwen-plus".to_string(),
            llm_timeout_secs: 5,
            ..Config::default()
        };
        let client = LlmClient::new(&config);

        assert_eq!(client.name(), "qwen-plus");
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transient_error() {
        let config = Config {
            llm_api_key: "sk-test".to_string(),
            llm_api_base_url: "http://127.0.0.1:9/v1".to_string(),
            llm_timeout_secs: 5,
            ..Config::default()
        };
        let client = LlmClient::new(&config);

        let err = client.complete("hello").await.unwrap_err();
        assert!(matches!(
            err,
            CompletionError::Request { .. } | CompletionError::Timeout { .. }
        ));
    }

    /// 测试 LLM API 连接性
    ///
    /// 运行方式：
    /// ```bash
    /// LLM_API_KEY=... cargo test test_llm_api_connectivity -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_llm_api_connectivity() {
        let _ = tracing_subscriber::fmt::try_init();

        let client = LlmClient::new(&create_test_config());
        let response = client
            .complete("Reply with the JSON array [true, false] and nothing else.")
            .await
            .expect("LLM 调用失败");

        println!("LLM 响应: {}", response);
        assert!(response.contains('['));
    }
}
