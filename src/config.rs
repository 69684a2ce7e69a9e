use crate::error::ConfigError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "ARXIV_DIGEST_CONFIG";
/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// arXiv 摘要检索关键词
    pub search_keyword: String,
    /// 接受的主分类，例如 `cs.CL`
    pub categories: Vec<String>,
    /// 每批发送给 LLM 的论文数量（目标值，实际会均衡分配）
    pub batch_size: usize,
    /// 相关性判断语句，嵌入到过滤提示词中
    pub filter_statement: String,
    /// 报告输出目录
    pub report_dir: String,
    /// 检索最近几天提交的论文
    pub lookback_days: i64,
    /// 离线论文列表（JSON），设置后不访问 arXiv
    pub papers_file: Option<String>,
    /// 自定义提示词目录（包含 filter.txt / summary.txt）
    pub prompt_dir: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_max_tokens: u32,
    pub llm_timeout_secs: u64,
    /// 两次重试之间的等待时间
    pub retry_delay_secs: u64,
    /// 实际读取的配置文件；为 `None` 表示文件不存在，使用了默认配置
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_keyword: "large language model".to_string(),
            categories: vec!["cs.CL".to_string(), "cs.LG".to_string(), "cs.AI".to_string()],
            batch_size: 10,
            filter_statement: "The paper proposes a new method or benchmark for language models."
                .to_string(),
            report_dir: "reports".to_string(),
            lookback_days: 1,
            papers_file: None,
            prompt_dir: None,
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            llm_max_tokens: 4096,
            llm_timeout_secs: 120,
            retry_delay_secs: 2,
            loaded_from: None,
        }
    }
}

impl Config {
    /// 配置文件路径：`ARXIV_DIGEST_CONFIG`，默认 `config.toml`
    pub fn config_path() -> PathBuf {
        std::env::var(CONFIG_PATH_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
            .into()
    }

    /// 加载配置：先读 TOML 文件（不存在时使用默认值），再用环境变量覆盖
    ///
    /// 此时日志尚未初始化，文件是否存在由调用方根据 `loaded_from` 记录。
    pub fn load() -> Result<Self> {
        let config = Self::from_file(&Self::config_path())?.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件读取配置，文件不存在时返回默认配置
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))?;
        Ok(Self {
            loaded_from: Some(path.to_path_buf()),
            ..config
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 环境变量覆盖
    pub fn apply_env(self) -> std::result::Result<Self, ConfigError> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    fn apply_vars(
        mut self,
        get: impl Fn(&'static str) -> Option<String>,
    ) -> std::result::Result<Self, ConfigError> {
        if let Some(v) = get("SEARCH_KEYWORD") {
            self.search_keyword = v;
        }
        if let Some(v) = get("CATEGORIES") {
            self.categories = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(v) = get("BATCH_SIZE") {
            self.batch_size = parse_var("BATCH_SIZE", v, "usize")?;
        }
        if let Some(v) = get("FILTER_STATEMENT") {
            self.filter_statement = v;
        }
        if let Some(v) = get("REPORT_DIR") {
            self.report_dir = v;
        }
        if let Some(v) = get("LOOKBACK_DAYS") {
            self.lookback_days = parse_var("LOOKBACK_DAYS", v, "i64")?;
        }
        if let Some(v) = get("PAPERS_FILE") {
            self.papers_file = Some(v);
        }
        if let Some(v) = get("PROMPT_DIR") {
            self.prompt_dir = Some(v);
        }
        if let Some(v) = get("VERBOSE_LOGGING") {
            self.verbose_logging = parse_var("VERBOSE_LOGGING", v, "bool")?;
        }
        if let Some(v) = get("LLM_API_KEY") {
            self.llm_api_key = v;
        }
        if let Some(v) = get("LLM_API_BASE_URL") {
            self.llm_api_base_url = v;
        }
        if let Some(v) = get("LLM_MODEL_NAME") {
            self.llm_model_name = v;
        }
        if let Some(v) = get("LLM_MAX_TOKENS") {
            self.llm_max_tokens = parse_var("LLM_MAX_TOKENS", v, "u32")?;
        }
        if let Some(v) = get("LLM_TIMEOUT_SECS") {
            self.llm_timeout_secs = parse_var("LLM_TIMEOUT_SECS", v, "u64")?;
        }
        if let Some(v) = get("RETRY_DELAY_SECS") {
            self.retry_delay_secs = parse_var("RETRY_DELAY_SECS", v, "u64")?;
        }
        Ok(self)
    }

    /// 检查配置是否可用
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }
        if self.categories.is_empty() {
            return Err(ConfigError::EmptyCategories);
        }
        if self.filter_statement.trim().is_empty() {
            return Err(ConfigError::EmptyFilterStatement);
        }
        if self.llm_api_key.is_empty() {
            return Err(ConfigError::MissingApiKey {
                var_name: "LLM_API_KEY",
            });
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(
    var_name: &'static str,
    value: String,
    expected_type: &'static str,
) -> std::result::Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::EnvVarParseFailed {
        var_name,
        value,
        expected_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn with_key() -> Config {
        Config {
            llm_api_key: "sk-test".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config = Config::from_toml_str(
            r#"
            search_keyword = "diffusion"
            categories = ["cs.CV"]
            batch_size = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.search_keyword, "diffusion");
        assert_eq!(config.categories, vec!["cs.CV"]);
        assert_eq!(config.batch_size, 4);
        // 未给出的字段保持默认值
        assert_eq!(config.report_dir, "reports");
        assert_eq!(config.retry_delay_secs, 2);
    }

    #[test]
    fn test_from_file_records_source() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Config::from_file(&dir.path().join("missing.toml")).unwrap();
        assert!(missing.loaded_from.is_none());
        assert_eq!(missing.batch_size, Config::default().batch_size);

        let path = dir.path().join("config.toml");
        std::fs::write(&path, "batch_size = 3\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.loaded_from, Some(path));
        assert_eq!(config.batch_size, 3);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CATEGORIES", "cs.CL, stat.ML,"),
            ("BATCH_SIZE", "7"),
            ("LLM_API_KEY", "sk-env"),
        ]
        .into_iter()
        .collect();

        let config = Config::default()
            .apply_vars(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.categories, vec!["cs.CL", "stat.ML"]);
        assert_eq!(config.batch_size, 7);
        assert_eq!(config.llm_api_key, "sk-env");
    }

    #[test]
    fn test_env_parse_failure() {
        let err = Config::default()
            .apply_vars(|name| (name == "BATCH_SIZE").then(|| "many".to_string()))
            .unwrap_err();

        assert_eq!(
            err,
            ConfigError::EnvVarParseFailed {
                var_name: "BATCH_SIZE",
                value: "many".to_string(),
                expected_type: "usize",
            }
        );
    }

    #[test]
    fn test_validate() {
        assert!(with_key().validate().is_ok());

        let zero = Config {
            batch_size: 0,
            ..with_key()
        };
        assert_eq!(zero.validate(), Err(ConfigError::InvalidBatchSize));

        let no_key = Config::default();
        assert!(matches!(
            no_key.validate(),
            Err(ConfigError::MissingApiKey { .. })
        ));

        let no_categories = Config {
            categories: Vec::new(),
            ..with_key()
        };
        assert_eq!(no_categories.validate(), Err(ConfigError::EmptyCategories));
    }
}
