/// 日志工具模块
///
/// 提供日志初始化以及流水线各阶段的格式化输出
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info。
/// 重复调用是安全的（测试中会多次调用）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
pub fn log_startup(keyword: &str, categories: &[String], batch_size: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 论文日报启动 - {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("🔍 关键词: {}", keyword);
    info!("🏷️ 分类: {}", categories.join(", "));
    info!("📦 目标批大小: {}", batch_size);
    info!("{}", "=".repeat(60));
}

/// 记录阶段开始信息
///
/// # 参数
/// - `stage`: 阶段名称（过滤 / 摘要）
/// - `total`: 论文总数
/// - `batches`: 批次数量
pub fn log_stage_start(stage: &str, total: usize, batches: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📋 {}: 共 {} 篇论文，分 {} 个均衡批次", stage, total, batches);
    info!("{}", "=".repeat(60));
}

/// 记录批次开始信息
pub fn log_batch_start(stage: &str, batch_num: usize, total_batches: usize, size: usize) {
    info!("📦 [{}] 开始处理第 {}/{} 批 ({} 篇)", stage, batch_num, total_batches, size);
}

/// 记录批次完成信息
pub fn log_batch_complete(stage: &str, batch_num: usize, produced: usize, total: usize) {
    info!("✓ [{}] 第 {} 批完成: {}/{} 条结果", stage, batch_num, produced, total);
}

/// 打印最终统计信息
///
/// # 参数
/// - `found`: 检索到的论文数
/// - `selected`: 通过过滤的论文数
/// - `report_path`: 报告文件路径
pub fn print_final_stats(found: usize, selected: usize, report_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 检索: {} 篇", found);
    info!("✅ 入选: {} 篇", selected);
    info!("{}", "=".repeat(60));
    info!("\n报告已保存至: {}", report_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
