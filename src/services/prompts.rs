//! 提示词模板
//!
//! 默认模板编译进二进制（`prompts/*.txt`），可以通过 `prompt_dir` 在运行时覆盖。
//! 占位符 `{filter_statement}` / `{papers}` 做字面替换，模板中可以放带花括号的 JSON 示例。

use anyhow::{Context, Result};
use std::path::Path;

const DEFAULT_FILTER_TEMPLATE: &str = include_str!("../../prompts/filter.txt");
const DEFAULT_SUMMARY_TEMPLATE: &str = include_str!("../../prompts/summary.txt");

pub const FILTER_STATEMENT_PLACEHOLDER: &str = "{filter_statement}";
pub const PAPERS_PLACEHOLDER: &str = "{papers}";

/// 过滤和摘要两个阶段使用的模板
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplates {
    pub filter: String,
    pub summary: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER_TEMPLATE.to_string(),
            summary: DEFAULT_SUMMARY_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// 从目录读取 `filter.txt` 和 `summary.txt`；缺少的文件使用默认模板
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            filter: read_or(dir.join("filter.txt").as_path(), defaults.filter)?,
            summary: read_or(dir.join("summary.txt").as_path(), defaults.summary)?,
        })
    }

    /// 按配置加载
    pub fn load(prompt_dir: Option<&str>) -> Result<Self> {
        match prompt_dir {
            Some(dir) => Self::from_dir(Path::new(dir)),
            None => Ok(Self::default()),
        }
    }
}

fn read_or(path: &Path, default: String) -> Result<String> {
    if !path.exists() {
        return Ok(default);
    }
    tracing::info!("使用自定义提示词模板: {}", path.display());
    std::fs::read_to_string(path).with_context(|| format!("无法读取提示词模板: {}", path.display()))
}

/// 填充模板
///
/// 只扫描一遍模板：替换进去的值不会再被当作占位符展开。
pub fn render(template: &str, replacements: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(ch) = rest.chars().next() {
        let matched = replacements
            .iter()
            .find(|(placeholder, _)| !placeholder.is_empty() && rest.starts_with(*placeholder));
        match matched {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &rest[placeholder.len()..];
            }
            None => {
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }
    out
}
