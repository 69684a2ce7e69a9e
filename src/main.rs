use anyhow::Result;
use arxiv_digest::utils::logging;
use arxiv_digest::{App, Config};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);
    match &config.loaded_from {
        Some(path) => info!("使用配置文件: {}", path.display()),
        None => warn!("配置文件 {} 不存在，使用默认配置", Config::config_path().display()),
    }

    // 初始化并运行应用
    App::initialize(config)?.run().await?;

    Ok(())
}
