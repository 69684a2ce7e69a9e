#![allow(dead_code)]

use arxiv_digest::{CompletionError, CompletionService, PaperRecord};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// 按顺序返回预设结果的补全服务，并记录调用次数和收到的提示词
pub struct ScriptedCompletion {
    responses: Mutex<VecDeque<Result<String, CompletionError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedCompletion {
    pub fn new(responses: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn ok(responses: &[&str]) -> Self {
        Self::new(responses.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("没有更多预设响应 (第 {} 次调用)", self.calls()))
    }
}

pub fn transient() -> Result<String, CompletionError> {
    Err(CompletionError::Timeout { secs: 1 })
}

pub fn paper(n: usize) -> PaperRecord {
    PaperRecord {
        id: format!("2510.{:05}", n),
        title: format!("Paper title {}", n),
        authors: vec![format!("Author {}a", n), format!("Author {}b", n)],
        summary: format!("Abstract of paper {}.", n),
        category: "cs.CL".to_string(),
        pdf_url: format!("https://arxiv.org/pdf/2510.{:05}", n),
    }
}

pub fn papers(n: usize) -> Vec<PaperRecord> {
    (1..=n).map(paper).collect()
}

/// 生成 n 条合法摘要的 JSON
pub fn summaries_json(labels: &[&str]) -> String {
    let items: Vec<String> = labels
        .iter()
        .map(|l| format!(r#"{{"motivation": "why {l}", "method": "how {l}"}}"#))
        .collect();
    format!("[{}]", items.join(", "))
}
